//! # Tidy Command
//!
//! Configures the project with CMake to obtain a compile database, adjusts
//! the database for clang-tidy, then runs `run-clang-tidy` over it.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::error;

use super::{EXIT_FAILURE, EXIT_SUCCESS, Toolbox};
use crate::compile_db::prepare_compile_commands;
use crate::config::TidyConfig;
use crate::exec::{ToolCommand, run_command_result};
use crate::locate::{ExecutableLocator, require};
use crate::output;

const CLANG_TIDY: &str = "clang-tidy";
const RUN_CLANG_TIDY: &str = "run-clang-tidy";

/// Arguments for the tidy command
#[derive(Args, Debug, Default)]
pub struct TidyArgs {
  /// Output binary directory [default: build]
  #[arg(long, short = 'd', value_name = "DIR")]
  pub dir: Option<PathBuf>,
}

/// `cmake -B "<dir>" --preset <preset> -DCMAKE_EXPORT_COMPILE_COMMANDS=ON`
pub fn configure_command(build_dir: &Path, preset: &str) -> ToolCommand {
  ToolCommand::new("cmake")
    .arg("-B")
    .path_arg(build_dir)
    .args(["--preset", preset, "-DCMAKE_EXPORT_COMPILE_COMMANDS=ON"])
}

/// `python "<run-clang-tidy>" -clang-tidy-binary "<clang-tidy>" -p "<dir>"`
pub fn driver_command(python: PathBuf, driver: &Path, clang_tidy: &Path, build_dir: &Path) -> ToolCommand {
  ToolCommand::new(python)
    .path_arg(driver)
    .arg("-clang-tidy-binary")
    .path_arg(clang_tidy)
    .arg("-p")
    .path_arg(build_dir)
}

/// Interpreter for the driver script: `python3`, then `python`.
fn python_interpreter(locator: &dyn ExecutableLocator) -> PathBuf {
  locator
    .locate("python3")
    .or_else(|| locator.locate("python"))
    .unwrap_or_else(|| PathBuf::from("python"))
}

/// Run the tidy command and return the exit code.
pub fn run_tidy(args: &TidyArgs, config: &TidyConfig, toolbox: &Toolbox) -> Result<u8> {
  let [clang_tidy, driver] = match require(toolbox.locator, [CLANG_TIDY, RUN_CLANG_TIDY]) {
    Ok(paths) => paths,
    Err(e) => {
      output::print_prerequisites_not_satisfied(&e.missing);
      return Ok(EXIT_FAILURE);
    }
  };

  let build_dir = args.dir.clone().unwrap_or_else(|| config.build_dir.clone());

  if !run_command_result(toolbox.runner, &configure_command(&build_dir, &config.preset)).is_success() {
    return Ok(EXIT_FAILURE);
  }

  if let Err(e) = prepare_compile_commands(&build_dir) {
    error!("{e:#}");
    eprintln!("Failed to prepare compile database: {e:#}");
    return Ok(EXIT_FAILURE);
  }

  let python = python_interpreter(toolbox.locator);
  let invocation = driver_command(python, &driver, &clang_tidy, &build_dir);

  if run_command_result(toolbox.runner, &invocation).is_success() {
    Ok(EXIT_SUCCESS)
  } else {
    Ok(EXIT_FAILURE)
  }
}
