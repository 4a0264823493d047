//! # Exec Module
//!
//! Synchronous execution of external tools with captured output.
//!
//! [`run_command_result`] is what the front-ends call: it announces the
//! command, runs it through a [`CommandRunner`], and reduces the outcome to
//! [`CommandStatus`]. There are no retries and no timeouts.

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error};

use crate::output;

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
  program: PathBuf,
  args: Vec<OsString>,
  /// Indices of path arguments, always quoted when displayed
  quoted: BTreeSet<usize>,
}

impl ToolCommand {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      quoted: BTreeSet::new(),
    }
  }

  /// Appends a path argument; it is shown double-quoted in the banner.
  #[must_use]
  pub fn path_arg(mut self, path: impl AsRef<Path>) -> Self {
    self.quoted.insert(self.args.len());
    self.args.push(path.as_ref().as_os_str().to_os_string());
    self
  }

  #[must_use]
  pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
    self.args.push(arg.as_ref().to_os_string());
    self
  }

  #[must_use]
  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    self.args.extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
    self
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  pub fn get_args(&self) -> &[OsString] {
    &self.args
  }
}

/// Renders the command the way it would be typed into a shell: absolute
/// program paths, path arguments and arguments containing whitespace are
/// double-quoted.
impl fmt::Display for ToolCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let program = self.program.to_string_lossy();
    if self.program.is_absolute() || needs_quotes(&program) {
      write!(f, "\"{program}\"")?;
    } else {
      write!(f, "{program}")?;
    }

    for (index, arg) in self.args.iter().enumerate() {
      let arg = arg.to_string_lossy();
      if self.quoted.contains(&index) || needs_quotes(&arg) {
        write!(f, " \"{arg}\"")?;
      } else {
        write!(f, " {arg}")?;
      }
    }
    Ok(())
  }
}

fn needs_quotes(s: &str) -> bool {
  s.is_empty() || s.chars().any(char::is_whitespace)
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
  /// Exit code, `None` when the process was killed by a signal
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub const fn success(&self) -> bool {
    matches!(self.code, Some(0))
  }
}

/// The process could not be started at all.
#[derive(Debug, thiserror::Error)]
#[error("Failed to launch '{program}': {source}")]
pub struct ExecError {
  pub program: String,
  #[source]
  pub source: std::io::Error,
}

/// Runs commands to completion.
pub trait CommandRunner {
  fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ExecError>;
}

/// Runner that spawns real processes in the inherited working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
  pub const fn new() -> Self {
    Self
  }
}

impl CommandRunner for SystemRunner {
  fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ExecError> {
    let output = Command::new(command.program())
      .args(command.get_args())
      .output()
      .map_err(|e| ExecError {
        program: command.program().display().to_string(),
        source: e,
      })?;

    debug!("'{}' exited with {:?}", command.program().display(), output.status.code());

    Ok(CommandOutput {
      code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
  }
}

/// Binary outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
  Success,
  Failure,
}

impl CommandStatus {
  pub const fn is_success(self) -> bool {
    matches!(self, Self::Success)
  }
}

/// Announces, runs and reports a command.
///
/// A non-zero exit prints the captured output; a launch error is logged.
/// Both count as [`CommandStatus::Failure`].
pub fn run_command_result(runner: &dyn CommandRunner, command: &ToolCommand) -> CommandStatus {
  output::print_running(command);

  match runner.run(command) {
    Ok(result) if result.success() => {
      output::print_success();
      CommandStatus::Success
    }
    Ok(result) => {
      output::print_failed(&result);
      CommandStatus::Failure
    }
    Err(e) => {
      error!("{e}");
      output::print_launch_failure(command);
      CommandStatus::Failure
    }
  }
}
