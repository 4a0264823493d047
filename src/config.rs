//! # Configuration Module
//!
//! Optional repository-level configuration for cxxtools. Every key has a
//! default, so a repository without a config file behaves exactly like one
//! with the defaults written out.
//!
//! Configuration is read from `.cxxtools.toml` in the repository root, from
//! the path in the `CXXTOOLS_CONFIG` environment variable, or from an explicit
//! `--config` path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".cxxtools.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "CXXTOOLS_CONFIG";

/// Default copyright holder written into new headers.
pub const DEFAULT_HOLDER: &str = "Rafal Maziejuk";

/// Settings for the `copyright` subcommand.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct CopyrightConfig {
  /// Name that follows the year range in the copyright line.
  pub holder: String,

  /// Optional notice template file, relative to the repository root.
  /// `{year_range}` and `{holder}` are substituted when rendering.
  pub notice_file: Option<PathBuf>,

  /// Directory names whose contents never get a header.
  pub excluded_dirs: Vec<String>,

  /// Comment marker per file extension (without the leading dot).
  pub comment_styles: BTreeMap<String, String>,
}

impl Default for CopyrightConfig {
  fn default() -> Self {
    let comment_styles = [("cpp", "//"), ("h", "//"), ("inl", "//"), ("py", "#")]
      .into_iter()
      .map(|(ext, marker)| (ext.to_string(), marker.to_string()))
      .collect();

    Self {
      holder: DEFAULT_HOLDER.to_string(),
      notice_file: None,
      excluded_dirs: vec!["third_party".to_string()],
      comment_styles,
    }
  }
}

/// Settings for the `format` subcommands.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
  /// Directories (relative to the repository root) holding sources to format.
  pub dirs: Vec<String>,
  /// Extensions (without the leading dot) of files to format.
  pub extensions: Vec<String>,
}

impl Default for FormatConfig {
  fn default() -> Self {
    Self {
      dirs: ["include", "sandbox", "src", "tests"].map(String::from).to_vec(),
      extensions: ["cpp", "h", "inl"].map(String::from).to_vec(),
    }
  }
}

/// Settings for the `tidy` subcommand.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct TidyConfig {
  /// CMake configure preset used to generate the compile database.
  pub preset: String,
  /// Build directory used when `--dir` is not given.
  pub build_dir: PathBuf,
}

impl Default for TidyConfig {
  fn default() -> Self {
    Self {
      preset: "clang-tidy".to_string(),
      build_dir: PathBuf::from("build"),
    }
  }
}

/// Main configuration struct, loaded from `.cxxtools.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
  pub copyright: CopyrightConfig,
  pub format: FormatConfig,
  pub tidy: TidyConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value failed validation.
  #[error("Invalid value for '{key}': {message}")]
  Invalid { key: String, message: String },
}

impl ConfigError {
  fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Invalid {
      key: key.into(),
      message: message.into(),
    }
  }
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    Self::parse(&content).map_err(|e| match e {
      ConfigError::ParseError { source, .. } => ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    })
  }

  /// Parse and validate configuration from TOML text.
  pub fn parse(content: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
      path: PathBuf::new(),
      source: e,
    })?;

    config.validate()?;

    Ok(config.normalize())
  }

  /// Checks that:
  /// - the holder is non-empty
  /// - comment markers are non-empty
  /// - extensions don't include the leading dot
  fn validate(&self) -> Result<(), ConfigError> {
    if self.copyright.holder.trim().is_empty() {
      return Err(ConfigError::invalid("copyright.holder", "holder cannot be empty"));
    }

    for (ext, marker) in &self.copyright.comment_styles {
      if ext.starts_with('.') {
        return Err(ConfigError::invalid(
          format!("copyright.comment-styles.{ext}"),
          "extension should not include leading dot",
        ));
      }
      if marker.trim().is_empty() {
        return Err(ConfigError::invalid(
          format!("copyright.comment-styles.{ext}"),
          "comment marker cannot be empty",
        ));
      }
    }

    if let Some(ext) = self.format.extensions.iter().find(|ext| ext.starts_with('.')) {
      return Err(ConfigError::invalid(
        "format.extensions",
        format!("extension '{ext}' should not include leading dot"),
      ));
    }

    if self.tidy.preset.trim().is_empty() {
      return Err(ConfigError::invalid("tidy.preset", "preset cannot be empty"));
    }

    Ok(())
  }

  /// Lowercases extension keys so lookups are case-insensitive.
  fn normalize(mut self) -> Self {
    self.copyright.comment_styles = self
      .copyright
      .comment_styles
      .into_iter()
      .map(|(k, v)| (k.to_lowercase(), v))
      .collect();
    self.format.extensions = self.format.extensions.into_iter().map(|e| e.to_lowercase()).collect();
    self
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `CXXTOOLS_CONFIG` environment variable
/// 3. `.cxxtools.toml` in the repository root
pub fn discover_config_path(explicit_path: Option<&Path>, repo_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let repo_config = repo_root.join(DEFAULT_CONFIG_FILENAME);
  if repo_config.exists() {
    verbose_log!("Using repository config: {}", repo_config.display());
    return Some(repo_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load the discovered configuration, falling back to defaults.
///
/// An explicit `--config` path that does not exist is an error rather than a
/// silent fallback.
pub fn load_config(explicit_path: Option<&Path>, repo_root: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  if let Some(path) = explicit_path
    && !path.exists()
  {
    anyhow::bail!("Config file not found: {}", path.display());
  }

  match discover_config_path(explicit_path, repo_root) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_empty_config_gives_defaults() {
    let config = Config::parse("").expect("empty config should parse");
    assert_eq!(config, Config::default());
    assert_eq!(config.copyright.holder, DEFAULT_HOLDER);
    assert_eq!(config.copyright.excluded_dirs, vec!["third_party"]);
    assert_eq!(config.copyright.comment_styles.get("py").map(String::as_str), Some("#"));
    assert_eq!(config.format.dirs, vec!["include", "sandbox", "src", "tests"]);
    assert_eq!(config.tidy.build_dir, PathBuf::from("build"));
  }

  #[test]
  fn test_parse_partial_config() {
    let config_content = concat!(
      "[copyright]\n",
      "holder = \"Example Corp\"\n",
      "\n",
      "[copyright.comment-styles]\n",
      "CMAKE = \"#\"\n",
      "\n",
      "[tidy]\n",
      "preset = \"tidy-debug\"\n",
    );

    let config = Config::parse(config_content).expect("valid config should parse");

    assert_eq!(config.copyright.holder, "Example Corp");
    // A table replaces the default map entirely
    assert_eq!(config.copyright.comment_styles.len(), 1);
    assert_eq!(config.copyright.comment_styles.get("cmake").map(String::as_str), Some("#"));
    assert_eq!(config.tidy.preset, "tidy-debug");
    assert_eq!(config.tidy.build_dir, PathBuf::from("build"));
    assert_eq!(config.format, FormatConfig::default());
  }

  #[test]
  fn test_validate_leading_dot() {
    let err = Config::parse("[copyright.comment-styles]\n\".cpp\" = \"//\"\n").expect_err("should fail");
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = Config::parse("[format]\nextensions = [\".cpp\"]\n").expect_err("should fail");
    assert!(err.to_string().contains("format.extensions"));
  }

  #[test]
  fn test_validate_empty_marker_and_holder() {
    let err = Config::parse("[copyright.comment-styles]\ncpp = \"  \"\n").expect_err("should fail");
    assert!(err.to_string().contains("comment marker cannot be empty"));

    let err = Config::parse("[copyright]\nholder = \"\"\n").expect_err("should fail");
    assert!(err.to_string().contains("copyright.holder"));
  }

  #[test]
  fn test_parse_invalid_toml() {
    let err = Config::parse("[copyright\nholder = 1").expect_err("should fail");
    assert!(matches!(err, ConfigError::ParseError { .. }));
  }

  #[test]
  fn test_load_config_from_repo_root() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
      temp_dir.path().join(DEFAULT_CONFIG_FILENAME),
      "[format]\ndirs = [\"lib\"]\n",
    )?;

    let config = load_config(None, temp_dir.path(), false)?;
    assert_eq!(config.format.dirs, vec!["lib"]);

    let config = load_config(None, temp_dir.path(), true)?;
    assert_eq!(config, Config::default());
    Ok(())
  }

  #[test]
  fn test_load_config_missing_explicit_path() {
    let temp_dir = TempDir::new().expect("temp dir");
    let missing = temp_dir.path().join("nope.toml");
    assert!(load_config(Some(&missing), temp_dir.path(), false).is_err());
  }
}
