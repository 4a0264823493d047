//! # Copyright Command
//!
//! Adds the copyright notice to staged files that lack one and extends stale
//! year ranges to the current year.

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use super::EXIT_SUCCESS;
use crate::collector::FileCollector;
use crate::config::CopyrightConfig;
use crate::file_filter::{CompositeFilter, ExcludedDirFilter, ExtensionFilter};
use crate::output;
use crate::templates::{ExtensionResolver, TemplateManager};
use crate::updater::CopyrightUpdater;
use crate::workspace::Workspace;

/// Arguments for the copyright command
#[derive(Args, Debug, Default)]
pub struct CopyrightArgs {
  /// Year to treat as current [default: the local calendar year]
  #[arg(long, value_name = "YYYY", value_parser = clap::value_parser!(i32).range(1000..=9999))]
  pub year: Option<i32>,
}

/// Run the copyright command and return the exit code.
pub fn run_copyright(args: &CopyrightArgs, workspace: &Workspace, config: &CopyrightConfig) -> Result<u8> {
  let year = args.year.unwrap_or_else(|| chrono::Local::now().year());
  debug!("Using {} as the current year", year);

  let mut template_manager = TemplateManager::new();
  if let Some(notice_file) = &config.notice_file {
    let path = workspace.root().join(notice_file);
    template_manager
      .load_template(&path)
      .with_context(|| format!("Failed to load notice template from {}", path.display()))?;
  }

  let updater = CopyrightUpdater::new(
    &config.holder,
    year,
    &template_manager,
    Box::new(ExtensionResolver::from_config(config)),
  )?;

  let filter = CompositeFilter::new(vec![
    Box::new(ExcludedDirFilter::new(config.excluded_dirs.iter().cloned())),
    Box::new(ExtensionFilter::new(config.comment_styles.keys())),
  ]);
  let files = FileCollector::new(workspace).collect_staged(&filter)?;

  let reports = updater.update_files(&files)?;
  output::print_copyright_summary(&reports, workspace.root());

  Ok(EXIT_SUCCESS)
}
