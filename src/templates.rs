//! # Templates Module
//!
//! Copyright notice templates and the comment styles used to embed them in
//! source files.
//!
//! The module includes:
//! - [`TemplateManager`] for loading and rendering notice templates
//! - [`NoticeData`] for the values substituted into a template
//! - [`CommentStyle`] and [`CommentStyleResolver`] for mapping a file to its
//!   line-comment marker
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use cxxtools::templates::{CommentStyleResolver, ExtensionResolver, NoticeData, TemplateManager};
//!
//! let manager = TemplateManager::new();
//! let notice = manager.render(&NoticeData {
//!   year_range: "2025".to_string(),
//!   holder: "Rafal Maziejuk".to_string(),
//! });
//!
//! let resolver = ExtensionResolver::builtin();
//! let style = resolver.resolve(Path::new("src/main.cpp")).expect("cpp is supported");
//! let lines = style.comment_lines(&notice, "\n");
//! assert_eq!(lines[0], "// Copyright 2025 Rafal Maziejuk\n");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::CopyrightConfig;
use crate::verbose_log;

/// The Apache-2.0 notice inserted into files without a copyright header.
pub const DEFAULT_NOTICE_TEMPLATE: &str = r#"Copyright {year_range} {holder}

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
"#;

/// Data used to fill out a notice template.
pub struct NoticeData {
  /// Year or `start-end` range placed after `Copyright`
  pub year_range: String,
  /// Copyright holder placed after the year range
  pub holder: String,
}

/// Manager for loading and rendering notice templates.
///
/// Templates are plain text with `{year_range}` and `{holder}` placeholders.
pub struct TemplateManager {
  template: String,
}

impl Default for TemplateManager {
  fn default() -> Self {
    Self::new()
  }
}

impl TemplateManager {
  /// Creates a manager holding the built-in Apache-2.0 notice.
  pub fn new() -> Self {
    Self {
      template: DEFAULT_NOTICE_TEMPLATE.to_string(),
    }
  }

  /// Creates a manager from template text.
  pub fn from_template(template: impl Into<String>) -> Self {
    Self {
      template: template.into(),
    }
  }

  /// Replaces the current template with the contents of a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or is not valid UTF-8.
  pub fn load_template(&mut self, path: &Path) -> Result<()> {
    verbose_log!("Loading notice template from: {}", path.display());

    self.template =
      fs::read_to_string(path).with_context(|| format!("Failed to read notice template file: {}", path.display()))?;

    Ok(())
  }

  /// Renders the template with the given data.
  pub fn render(&self, data: &NoticeData) -> String {
    verbose_log!("Rendering notice with year range: {}", data.year_range);

    self
      .template
      .replace("{year_range}", &data.year_range)
      .replace("{holder}", &data.holder)
  }
}

/// Line-comment style for a file type, e.g. `//` or `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
  /// Marker that starts a comment line, without trailing whitespace
  pub marker: String,
}

impl CommentStyle {
  /// Create a line-comment style from its marker.
  pub fn line(marker: &str) -> Self {
    Self {
      marker: marker.trim_end().to_string(),
    }
  }

  /// Turns text into comment lines, each terminated by `line_ending`.
  ///
  /// Non-empty lines become `<marker> <line>`; empty lines become the bare
  /// marker so no trailing whitespace is produced.
  pub fn comment_lines(&self, text: &str, line_ending: &str) -> Vec<String> {
    text
      .lines()
      .map(|line| {
        if line.is_empty() {
          format!("{}{}", self.marker, line_ending)
        } else {
          format!("{} {}{}", self.marker, line, line_ending)
        }
      })
      .collect()
  }
}

/// Resolves the comment style for a file path.
///
/// `None` means the file type is not recognized and the file must be left
/// alone.
pub trait CommentStyleResolver: Send + Sync {
  fn resolve(&self, path: &Path) -> Option<CommentStyle>;
}

/// Resolver keyed on the (case-insensitive) file extension.
#[derive(Debug, Clone)]
pub struct ExtensionResolver {
  styles: BTreeMap<String, CommentStyle>,
}

impl ExtensionResolver {
  /// Builds a resolver from `extension -> marker` pairs.
  pub fn new<'a>(styles: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
    Self {
      styles: styles
        .into_iter()
        .map(|(ext, marker)| (ext.to_lowercase(), CommentStyle::line(marker)))
        .collect(),
    }
  }

  /// The resolver used when no configuration overrides it.
  pub fn builtin() -> Self {
    Self::from_config(&CopyrightConfig::default())
  }

  /// Builds a resolver from the `[copyright.comment-styles]` table.
  pub fn from_config(config: &CopyrightConfig) -> Self {
    Self::new(
      config
        .comment_styles
        .iter()
        .map(|(ext, marker)| (ext.as_str(), marker.as_str())),
    )
  }
}

impl CommentStyleResolver for ExtensionResolver {
  fn resolve(&self, path: &Path) -> Option<CommentStyle> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    self.styles.get(&extension).cloned()
  }
}
