//! # Workspace Module
//!
//! The repository a command operates on. It is created once per run and
//! passed to whatever needs repository paths.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use git2::Repository;

use crate::git;

/// A git working tree.
pub struct Workspace {
  root: PathBuf,
  repo: Repository,
}

impl Workspace {
  /// Finds the repository containing `start`.
  ///
  /// # Errors
  ///
  /// Fails outside a git repository or for a bare repository.
  pub fn discover(start: &Path) -> Result<Self> {
    let repo = git::discover_repo(start)?;
    let root = repo
      .workdir()
      .map(Path::to_path_buf)
      .ok_or_else(|| anyhow!("Repository at {} has no working tree", repo.path().display()))?;

    Ok(Self { root, repo })
  }

  /// Finds the repository containing the current directory.
  pub fn from_current_dir() -> Result<Self> {
    let current_dir = std::env::current_dir()?;
    Self::discover(&current_dir)
  }

  /// The working-tree root.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Staged new or modified files as absolute paths.
  pub fn staged_changes(&self) -> Result<Vec<PathBuf>> {
    Ok(
      git::staged_changes(&self.repo)?
        .into_iter()
        .map(|path| self.root.join(path))
        .collect(),
    )
  }
}

/// Directory used to look up configuration: the repository root when inside
/// one, otherwise the current directory.
pub fn config_root() -> Result<PathBuf> {
  let current_dir = std::env::current_dir()?;
  Ok(git::discover_repo_root(&current_dir).unwrap_or(current_dir))
}
