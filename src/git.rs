//! # Git Module
//!
//! Repository discovery and the index-versus-`HEAD` comparison used to pick
//! the files a `copyright` run touches.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{Delta, DiffOptions, Repository};
use tracing::{debug, trace};

/// Opens the repository containing `start`, searching parent directories.
///
/// # Errors
///
/// Fails when `start` is not inside a git repository.
pub fn discover_repo(start: &Path) -> Result<Repository> {
  Repository::discover(start).with_context(|| format!("Not inside a git repository: {}", start.display()))
}

/// Returns the working-tree root of `start`'s repository, or `None` outside
/// a repository.
pub fn discover_repo_root(start: &Path) -> Option<PathBuf> {
  Repository::discover(start)
    .ok()
    .and_then(|repo| repo.workdir().map(Path::to_path_buf))
}

/// Lists files that differ between the index and `HEAD`, excluding deletions.
///
/// This is what `git diff --cached --diff-filter=d --name-only` reports: new,
/// modified, renamed and type-changed files that are staged. With an unborn
/// `HEAD` every index entry counts as added. Paths are relative to the
/// working-tree root.
pub fn staged_changes(repo: &Repository) -> Result<Vec<PathBuf>> {
  let head_tree = match repo.head() {
    Ok(head) => Some(head.peel_to_tree().with_context(|| "Failed to get tree for HEAD commit")?),
    Err(e) if e.code() == git2::ErrorCode::UnbornBranch || e.code() == git2::ErrorCode::NotFound => {
      debug!("HEAD is unborn, treating every staged file as new");
      None
    }
    Err(e) => return Err(e).with_context(|| "Failed to get HEAD reference"),
  };

  let index = repo.index().with_context(|| "Failed to read git index")?;

  let mut options = DiffOptions::new();
  options.include_typechange(true);

  let diff = repo
    .diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut options))
    .with_context(|| "Failed to diff index against HEAD")?;

  let mut changed = Vec::new();
  for delta in diff.deltas() {
    if delta.status() == Delta::Deleted {
      continue;
    }
    if let Some(path) = delta.new_file().path() {
      trace!("Staged change ({:?}): {}", delta.status(), path.display());
      changed.push(path.to_path_buf());
    }
  }

  debug!("Found {} staged changes", changed.len());
  Ok(changed)
}
