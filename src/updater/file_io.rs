//! # File I/O Module
//!
//! Whole-file reads and writes used by the updater.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the updater.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read or is not valid UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Replace the file content.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
