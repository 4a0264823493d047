//! # Output Module
//!
//! All user-facing output for cxxtools. Informational lines respect `-q`;
//! failure output (captured tool output, prerequisite errors) is always
//! shown.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::exec::{CommandOutput, ToolCommand};
use crate::logging::{is_quiet, is_verbose};
use crate::updater::{FileReport, HeaderAction};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Year updated
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files listed per group before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the `Running [...] command` banner.
pub fn print_running(command: &ToolCommand) {
  if is_quiet() {
    return;
  }
  println!("Running [{}] command", command);
}

/// Print the success marker after a command.
pub fn print_success() {
  if is_quiet() {
    return;
  }
  println!("{} Success", symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()));
  println!();
}

/// Print the failure marker followed by the captured output.
pub fn print_failed(output: &CommandOutput) {
  println!("{} Failed", symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()));
  println!();

  if !output.stdout.is_empty() {
    print!("{}", output.stdout);
    if !output.stdout.ends_with('\n') {
      println!();
    }
  }
  if !output.stderr.is_empty() {
    eprint!("{}", output.stderr);
    if !output.stderr.ends_with('\n') {
      eprintln!();
    }
  }
}

/// Print that a command could not be started.
pub fn print_launch_failure(command: &ToolCommand) {
  eprintln!(
    "{} [{}] failed to run",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    command
  );
}

/// Print the prerequisites message with the missing tool names.
pub fn print_prerequisites_not_satisfied(missing: &[String]) {
  eprintln!(
    "{} Prerequisites not satisfied (missing: {})",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    missing.join(", ")
  );
}

/// Print what the copyright pass changed.
pub fn print_copyright_summary(reports: &[FileReport], repo_root: &Path) {
  if is_quiet() {
    return;
  }

  let added: Vec<&FileReport> = reports
    .iter()
    .filter(|r| r.action == HeaderAction::HeaderAdded)
    .collect();
  let updated: Vec<&FileReport> = reports
    .iter()
    .filter(|r| matches!(r.action, HeaderAction::YearUpdated { .. }))
    .collect();

  if added.is_empty() && updated.is_empty() {
    println!(
      "{} Copyright notice up to date in {} checked {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      reports.len(),
      plural(reports.len())
    );
    return;
  }

  if !added.is_empty() {
    println!(
      "{} Added copyright notice to {} {}:",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      added.len(),
      plural(added.len())
    );
    print_file_list(&added, repo_root);
  }

  if !updated.is_empty() {
    if !added.is_empty() {
      println!();
    }
    println!(
      "{} Updated copyright year in {} {}:",
      symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
      updated.len(),
      plural(updated.len())
    );
    print_file_list(&updated, repo_root);
  }
}

fn print_file_list(files: &[&FileReport], repo_root: &Path) {
  let count = files.len();
  let limit = if is_verbose() { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, repo_root));
  }

  if count > limit {
    println!("  ... and {} more (use -v to see all)", count - limit);
  }
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Path relative to `root` for display, falling back to the full path.
pub fn make_relative_path(path: &Path, root: &Path) -> String {
  pathdiff::diff_paths(path, root)
    .filter(|rel| !rel.starts_with(".."))
    .unwrap_or_else(|| path.to_path_buf())
    .display()
    .to_string()
}
