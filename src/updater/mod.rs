//! # Updater Module
//!
//! Keeps copyright headers current in source files.
//!
//! The module is organized into:
//! - [`header`] - locating copyright lines and computing updated content
//! - [`file_io`] - whole-file reads and writes
//!
//! [`CopyrightUpdater`] ties them to a comment style resolver and a rendered
//! notice.

mod file_io;
mod header;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
pub use file_io::FileIO;
pub use header::{HeaderAction, HeaderMatch, HeaderTransformer, YearRange};
use tracing::{debug, trace};

use crate::templates::{CommentStyleResolver, NoticeData, TemplateManager};

/// Outcome of updating a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  pub path: PathBuf,
  pub action: HeaderAction,
}

/// Error for files the updater cannot handle.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
  #[error("No comment style known for file: {}", .0.display())]
  UnsupportedFile(PathBuf),

  #[error("Notice template must contain a 'Copyright {{year_range}} {{holder}}' line")]
  NoticeWithoutCopyrightLine,
}

/// Ensures files carry a copyright header covering the current year.
pub struct CopyrightUpdater {
  transformer: HeaderTransformer,
  resolver: Box<dyn CommentStyleResolver>,
  notice: String,
}

impl CopyrightUpdater {
  /// Creates an updater for `holder` in `current_year`.
  ///
  /// # Errors
  ///
  /// Fails if the rendered notice has no copyright line the updater would
  /// recognize later, since inserting it would not converge.
  pub fn new(
    holder: &str,
    current_year: i32,
    template_manager: &TemplateManager,
    resolver: Box<dyn CommentStyleResolver>,
  ) -> Result<Self> {
    let transformer = HeaderTransformer::new(holder, current_year)?;
    let notice = template_manager.render(&NoticeData {
      year_range: current_year.to_string(),
      holder: holder.to_string(),
    });

    let lines: Vec<&str> = notice.lines().collect();
    match transformer.find_year_range(&lines) {
      Some(found) if found.range.covers(current_year) => {}
      _ => return Err(UpdateError::NoticeWithoutCopyrightLine.into()),
    }

    Ok(Self {
      transformer,
      resolver,
      notice,
    })
  }

  /// Whether the file type has a known comment style.
  pub fn supports(&self, path: &Path) -> bool {
    self.resolver.resolve(path).is_some()
  }

  /// Updates one file in place.
  ///
  /// The file is rewritten only when its content changes.
  pub fn update_file(&self, path: &Path) -> Result<HeaderAction> {
    let style = self
      .resolver
      .resolve(path)
      .ok_or_else(|| UpdateError::UnsupportedFile(path.to_path_buf()))?;

    let content = FileIO::read_full_content(path)?;
    let (action, updated) = self.transformer.apply(&content, &style, &self.notice);

    match action {
      HeaderAction::Unchanged => {
        trace!("Header up to date: {}", path.display());
      }
      HeaderAction::YearUpdated { previous } => {
        debug!(
          "Updating copyright year {} -> {}-{}: {}",
          previous,
          previous.start,
          self.transformer.current_year(),
          path.display()
        );
        FileIO::write_file(path, &updated)?;
      }
      HeaderAction::HeaderAdded => {
        debug!("Adding copyright notice: {}", path.display());
        FileIO::write_file(path, &updated)?;
      }
    }

    Ok(action)
  }

  /// Updates every supported file, skipping the rest silently.
  ///
  /// Stops at the first file that cannot be read or written.
  pub fn update_files(&self, paths: &[PathBuf]) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(paths.len());

    for path in paths {
      if !self.supports(path) {
        trace!("Skipping file without comment style: {}", path.display());
        continue;
      }

      let action = self
        .update_file(path)
        .with_context(|| format!("Failed to update copyright in {}", path.display()))?;
      reports.push(FileReport {
        path: path.clone(),
        action,
      });
    }

    Ok(reports)
  }
}
