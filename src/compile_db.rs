//! # Compile Database Module
//!
//! Rewrites the CMake-generated `compile_commands.json` before clang-tidy
//! reads it:
//! - third-party include directories passed with `-I` become `-isystem`, so
//!   diagnostics from vendored headers are suppressed;
//! - `@<file>.modmap` response-file references are removed, since clang-tidy
//!   cannot consume module maps produced for the real compiler.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{debug, warn};

/// File name CMake writes with `CMAKE_EXPORT_COMPILE_COMMANDS=ON`.
pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

static THIRD_PARTY_INCLUDE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(-I)([^ ]*third_party[^ ]*include\b)").expect("include regex must compile"));

static MODMAP_REFERENCE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"@[^ ]+\.modmap").expect("modmap regex must compile"));

/// Applies both substitutions to the raw database text.
pub fn rewrite_compile_commands(data: &str) -> Cow<'_, str> {
  match THIRD_PARTY_INCLUDE.replace_all(data, "-isystem ${2}") {
    Cow::Borrowed(unchanged) => MODMAP_REFERENCE.replace_all(unchanged, ""),
    Cow::Owned(rewritten) => Cow::Owned(MODMAP_REFERENCE.replace_all(&rewritten, "").into_owned()),
  }
}

/// Rewrites `<build_dir>/compile_commands.json` in place and returns its path.
///
/// # Errors
///
/// Fails if the file is missing or cannot be read or written.
pub fn prepare_compile_commands(build_dir: &Path) -> Result<PathBuf> {
  let path = build_dir.join(COMPILE_COMMANDS_FILE);
  if !path.is_file() {
    bail!("Compile database not found: {}", path.display());
  }

  let data = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
  let rewritten = rewrite_compile_commands(&data);

  match serde_json::from_str::<Vec<serde_json::Value>>(&rewritten) {
    Ok(entries) => debug!("Compile database has {} entries", entries.len()),
    Err(e) => warn!("{} does not parse as a compile database: {}", path.display(), e),
  }

  if let Cow::Owned(rewritten) = rewritten {
    std::fs::write(&path, rewritten).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Rewrote {}", path.display());
  } else {
    debug!("{} needs no changes", path.display());
  }

  Ok(path)
}
