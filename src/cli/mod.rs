//! # CLI Module
//!
//! Command-line interface: clap argument parsing and dispatch to the
//! `copyright`, `format` and `tidy` front-ends.

mod copyright;
mod format;
mod tidy;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{CommandFactory, Parser, Subcommand};
pub use copyright::{CopyrightArgs, run_copyright};
pub use format::{FormatArgs, FormatCommand, run_format};
pub use tidy::{TidyArgs, run_tidy};
use tracing::debug;

use crate::config::load_config;
use crate::exec::{CommandRunner, SystemRunner};
use crate::locate::{ExecutableLocator, SystemLocator};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::workspace::{Workspace, config_root};

/// Exit code for success.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for any failure.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code of `format check` when clang-format is missing.
pub const EXIT_PREREQUISITES: u8 = 2;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "cxxtools",
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add copyright notices to staged files and bump stale years
  cxxtools copyright

  # Verify formatting of all sources
  cxxtools format check

  # Reformat all sources in place
  cxxtools format fix

  # Run clang-tidy using build-tidy as the CMake binary directory
  cxxtools tidy --dir build-tidy
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  #[command(flatten)]
  pub global: GlobalArgs,
}

/// Flags shared by every subcommand.
#[derive(clap::Args, Debug, Default)]
pub struct GlobalArgs {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Suppress all output except errors and failing tool output
  #[arg(short, long, conflicts_with = "verbose", global = true)]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum,
    global = true
  )]
  pub colors: ColorMode,

  /// Path to config file (default: .cxxtools.toml in the repository root)
  #[arg(long, value_name = "FILE", global = true)]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, global = true)]
  pub no_config: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Add copyright notice to new files and update stale years
  Copyright(CopyrightArgs),
  /// Format code via clang-format
  Format(FormatArgs),
  /// Check code via clang-tidy
  Tidy(TidyArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// External-process seams used by the front-ends.
pub struct Toolbox<'a> {
  pub locator: &'a dyn ExecutableLocator,
  pub runner: &'a dyn CommandRunner,
}

/// Sets up logging, then runs the selected subcommand against the real
/// system. Returns the process exit code.
pub fn run(cli: Cli) -> Result<u8> {
  init_tracing(cli.global.quiet, cli.global.verbose);

  if cli.global.verbose > 0 {
    set_verbose();
  } else if cli.global.quiet {
    set_quiet();
  }
  cli.global.colors.apply();

  let locator = SystemLocator;
  let runner = SystemRunner::new();
  let toolbox = Toolbox {
    locator: &locator,
    runner: &runner,
  };

  match cli.command {
    Command::Copyright(args) => {
      let workspace = Workspace::from_current_dir()?;
      debug!("Using repository root: {}", workspace.root().display());
      let config = load_config(cli.global.config.as_deref(), workspace.root(), cli.global.no_config)?;
      run_copyright(&args, &workspace, &config.copyright)
    }
    Command::Format(FormatArgs { command: None }) => {
      print_format_help()?;
      Ok(EXIT_SUCCESS)
    }
    Command::Format(FormatArgs {
      command: Some(command),
    }) => {
      let workspace = Workspace::from_current_dir()?;
      debug!("Using repository root: {}", workspace.root().display());
      let config = load_config(cli.global.config.as_deref(), workspace.root(), cli.global.no_config)?;
      run_format(command, &workspace, &config.format, &toolbox)
    }
    Command::Tidy(args) => {
      let config = load_config(cli.global.config.as_deref(), &config_root()?, cli.global.no_config)?;
      run_tidy(&args, &config.tidy, &toolbox)
    }
  }
}

fn print_format_help() -> Result<()> {
  let mut command = Cli::command();
  command.build();
  if let Some(format) = command.find_subcommand_mut("format") {
    format.print_help()?;
  }
  Ok(())
}
