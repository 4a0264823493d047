//! # File Collector Module
//!
//! Enumerates repository files for the front-ends, either by scanning
//! directories or from the staged changes of the repository.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::file_filter::FileFilter;
use crate::workspace::Workspace;

/// File collector rooted at a workspace.
pub struct FileCollector<'a> {
  workspace: &'a Workspace,
}

impl<'a> FileCollector<'a> {
  pub const fn new(workspace: &'a Workspace) -> Self {
    Self { workspace }
  }

  /// Recursively scans `dirs` (relative to the repository root, or the whole
  /// tree when empty) and keeps the files accepted by `filter`.
  ///
  /// Missing directories contribute nothing. The result is sorted.
  pub fn collect_filtered(&self, dirs: &[String], filter: &dyn FileFilter) -> Result<Vec<PathBuf>> {
    let root = self.workspace.root();
    let roots: Vec<PathBuf> = if dirs.is_empty() {
      vec![root.to_path_buf()]
    } else {
      dirs.iter().map(|dir| root.join(dir)).collect()
    };

    let mut files = Vec::new();
    for dir in &roots {
      files.extend(scan_directory(dir, filter));
    }

    files.sort();
    files.dedup();
    Ok(files)
  }

  /// Staged new or modified files accepted by `filter`.
  ///
  /// The filter sees paths relative to the repository root, so a root that
  /// itself sits under an excluded name does not exclude everything.
  pub fn collect_staged(&self, filter: &dyn FileFilter) -> Result<Vec<PathBuf>> {
    let root = self.workspace.root();
    let mut files: Vec<PathBuf> = self
      .workspace
      .staged_changes()?
      .into_iter()
      .filter(|path| accepts(filter, path.strip_prefix(root).unwrap_or(path)))
      .filter(|path| {
        // Staged but since removed from the working tree
        let present = path.is_file();
        if !present {
          warn!("Skipping staged file missing from the working tree: {}", path.display());
        }
        present
      })
      .collect();

    files.sort();
    debug!("Selected {} staged files", files.len());
    Ok(files)
  }
}

/// Applies `filter`, logging why a rejected file was skipped.
fn accepts(filter: &dyn FileFilter, path: &Path) -> bool {
  let result = filter.should_process(path);
  if let Some(reason) = &result.reason {
    trace!("Skipping {}: {}", path.display(), reason);
  }
  result.should_process
}

/// Walks `dir` recursively, collecting regular files accepted by `filter`.
pub fn scan_directory(dir: &Path, filter: &dyn FileFilter) -> Vec<PathBuf> {
  if !dir.is_dir() {
    debug!("Skipping missing directory: {}", dir.display());
    return Vec::new();
  }

  debug!("Scanning directory: {}", dir.display());
  let start_time = std::time::Instant::now();

  let mut files = Vec::new();
  for entry in WalkDir::new(dir).follow_links(false) {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        warn!("Error reading directory entry under {}: {}", dir.display(), e);
        continue;
      }
    };

    if entry.file_type().is_file() && accepts(filter, entry.path()) {
      files.push(entry.into_path());
    }
  }

  debug!(
    "Found {} files in {}ms",
    files.len(),
    start_time.elapsed().as_millis()
  );

  files
}
