#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use cxxtools::exec::{CommandOutput, CommandRunner, ExecError, ToolCommand};

/// Checks if git is available on the system.
pub fn is_git_available() -> bool {
  Command::new("git").arg("--version").status().is_ok()
}

/// Runs a git command in the given directory, returning an error with stderr on
/// failure.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Initializes a git repository in the given directory with deterministic
/// settings.
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init"])?;
  run_git(dir, &["config", "init.defaultBranch", "main"])?;
  run_git(dir, &["branch", "-M", "main"])?;
  run_git(dir, &["config", "user.name", "Test User"])?;
  run_git(dir, &["config", "user.email", "test@example.com"])?;
  // Disable commit signing for test isolation
  run_git(dir, &["config", "commit.gpgsign", "false"])?;
  Ok(())
}

/// Creates a commit with all staged changes.
pub fn git_commit(dir: &Path, message: &str) -> Result<()> {
  run_git(dir, &["commit", "-m", message])
}

/// Stages a file and creates a commit.
pub fn git_add_and_commit(dir: &Path, file: &str, message: &str) -> Result<()> {
  run_git(dir, &["add", file])?;
  git_commit(dir, message)
}

/// Writes a file (creating parent directories) relative to `dir`.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> Result<()> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Command runner that records invocations instead of spawning processes.
///
/// Exit codes are consumed from a queue; once it is empty every command
/// succeeds. An optional hook runs for each command, e.g. to create files a
/// real tool would have produced.
#[derive(Default)]
pub struct FakeRunner {
  pub calls: RefCell<Vec<ToolCommand>>,
  exit_codes: RefCell<VecDeque<i32>>,
  hook: Option<Box<dyn Fn(&ToolCommand)>>,
}

impl FakeRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_exit_codes(codes: &[i32]) -> Self {
    Self {
      exit_codes: RefCell::new(codes.iter().copied().collect()),
      ..Self::default()
    }
  }

  pub fn with_hook(mut self, hook: impl Fn(&ToolCommand) + 'static) -> Self {
    self.hook = Some(Box::new(hook));
    self
  }

  pub fn rendered_calls(&self) -> Vec<String> {
    self.calls.borrow().iter().map(ToString::to_string).collect()
  }
}

impl CommandRunner for FakeRunner {
  fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ExecError> {
    self.calls.borrow_mut().push(command.clone());
    if let Some(hook) = &self.hook {
      hook(command);
    }

    let code = self.exit_codes.borrow_mut().pop_front().unwrap_or(0);
    Ok(CommandOutput {
      code: Some(code),
      stdout: if code == 0 { String::new() } else { "tool reported problems\n".to_string() },
      stderr: String::new(),
    })
  }
}
