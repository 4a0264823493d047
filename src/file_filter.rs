//! # File Filter Module
//!
//! Filters applied while enumerating repository files: by extension and by
//! excluded directory names.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use crate::verbose_log;

/// Result of a file filtering operation.
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// The file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// The file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// Keeps files whose extension is in a fixed set.
///
/// Extensions are stored without the leading dot and compared
/// case-insensitively. An empty set keeps every file.
#[derive(Debug, Clone, Default)]
pub struct ExtensionFilter {
  extensions: BTreeSet<String>,
}

impl ExtensionFilter {
  pub fn new<I, S>(extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self {
      extensions: extensions
        .into_iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
        .collect(),
    }
  }

  /// Whether the filter restricts anything.
  pub fn is_active(&self) -> bool {
    !self.extensions.is_empty()
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    if !self.is_active() {
      return FilterResult::process();
    }

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .unwrap_or_default();

    if self.extensions.contains(&extension) {
      FilterResult::process()
    } else {
      FilterResult::skip(format!("Extension '{extension}' not selected"))
    }
  }
}

/// Drops files with any path component equal to one of the given names.
#[derive(Debug, Clone, Default)]
pub struct ExcludedDirFilter {
  names: BTreeSet<String>,
}

impl ExcludedDirFilter {
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      names: names.into_iter().map(Into::into).collect(),
    }
  }
}

impl FileFilter for ExcludedDirFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    let excluded = path.components().find_map(|component| match component {
      Component::Normal(name) => name.to_str().filter(|n| self.names.contains(*n)),
      _ => None,
    });

    match excluded {
      Some(name) => {
        verbose_log!("Skipping: {} (inside excluded directory '{}')", path.display(), name);
        FilterResult::skip(format!("Inside excluded directory '{name}'"))
      }
      None => FilterResult::process(),
    }
  }
}

/// Filter that combines multiple filters; all must accept the file.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    for filter in &self.filters {
      let result = filter.should_process(path);
      if !result.should_process {
        return result;
      }
    }
    FilterResult::process()
  }
}
