//! # Format Command
//!
//! `format check` and `format fix`: run clang-format over the repository's
//! C++ sources, either as a dry run that fails on any formatting difference
//! or in place.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{EXIT_FAILURE, EXIT_PREREQUISITES, EXIT_SUCCESS, Toolbox};
use crate::collector::FileCollector;
use crate::config::FormatConfig;
use crate::exec::{ToolCommand, run_command_result};
use crate::file_filter::ExtensionFilter;
use crate::info_log;
use crate::locate::require;
use crate::output;
use crate::workspace::Workspace;

const CLANG_FORMAT: &str = "clang-format";

/// Arguments for the format command
#[derive(Args, Debug)]
pub struct FormatArgs {
  #[command(subcommand)]
  pub command: Option<FormatCommand>,
}

/// Format subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
  /// Check sources formatting
  Check,
  /// Fix sources formatting
  Fix,
}

impl FormatCommand {
  /// clang-format flags selecting the mode.
  const fn mode_args(self) -> &'static [&'static str] {
    match self {
      FormatCommand::Check => &["-Werror", "--dry-run"],
      FormatCommand::Fix => &["-Werror", "-i"],
    }
  }

  const fn prerequisites_exit_code(self) -> u8 {
    match self {
      FormatCommand::Check => EXIT_PREREQUISITES,
      FormatCommand::Fix => EXIT_FAILURE,
    }
  }
}

/// Run a format subcommand and return the exit code.
pub fn run_format(command: FormatCommand, workspace: &Workspace, config: &FormatConfig, toolbox: &Toolbox) -> Result<u8> {
  let [clang_format] = match require(toolbox.locator, [CLANG_FORMAT]) {
    Ok(paths) => paths,
    Err(e) => {
      output::print_prerequisites_not_satisfied(&e.missing);
      return Ok(command.prerequisites_exit_code());
    }
  };

  let filter = ExtensionFilter::new(&config.extensions);
  let sources = FileCollector::new(workspace).collect_filtered(&config.dirs, &filter)?;

  if sources.is_empty() {
    info_log!("No sources matched in: {}", config.dirs.join(", "));
    return Ok(EXIT_SUCCESS);
  }

  let invocation = ToolCommand::new(clang_format)
    .args(command.mode_args())
    .args(&sources);

  if run_command_result(toolbox.runner, &invocation).is_success() {
    Ok(EXIT_SUCCESS)
  } else {
    Ok(EXIT_FAILURE)
  }
}
