//! # Locate Module
//!
//! Resolves external tools to absolute paths through `PATH` (the equivalent
//! of `which`/`where`), and checks that a front-end's prerequisites exist
//! before anything runs.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

/// Looks up executables by name.
pub trait ExecutableLocator {
  /// Absolute path of `name`, or `None` when it cannot be found.
  fn locate(&self, name: &str) -> Option<PathBuf>;
}

/// Locator backed by the `which` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLocator;

impl ExecutableLocator for SystemLocator {
  fn locate(&self, name: &str) -> Option<PathBuf> {
    match which::which(name) {
      Ok(path) => {
        debug!("Tool '{name}' detected at: {}", path.display());
        Some(path)
      }
      Err(e) => {
        debug!("Tool '{name}' not found: {e}");
        None
      }
    }
  }
}

/// Locator with a fixed table of tools, for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct StaticLocator {
  tools: HashMap<String, PathBuf>,
}

impl StaticLocator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `name` at `path`.
  #[must_use]
  pub fn with_tool(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
    self.tools.insert(name.to_string(), path.into());
    self
  }
}

impl ExecutableLocator for StaticLocator {
  fn locate(&self, name: &str) -> Option<PathBuf> {
    self.tools.get(name).cloned()
  }
}

/// One or more required tools could not be found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Prerequisites not satisfied: missing {}", .missing.join(", "))]
pub struct PrerequisiteError {
  pub missing: Vec<String>,
}

/// Resolves every name in `names`, in order.
///
/// # Errors
///
/// Returns all missing names at once rather than stopping at the first.
pub fn require<const N: usize>(
  locator: &dyn ExecutableLocator,
  names: [&str; N],
) -> Result<[PathBuf; N], PrerequisiteError> {
  let located = names.map(|name| locator.locate(name));
  let missing: Vec<String> = names
    .iter()
    .zip(&located)
    .filter(|(_, path)| path.is_none())
    .map(|(name, _)| (*name).to_string())
    .collect();

  // Fewer than N paths means at least one tool was missing
  match <[PathBuf; N]>::try_from(located.into_iter().flatten().collect::<Vec<_>>()) {
    Ok(paths) => Ok(paths),
    Err(_) => Err(PrerequisiteError { missing }),
  }
}
