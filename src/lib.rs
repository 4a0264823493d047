//! # cxxtools
//!
//! Developer tooling for a C++ repository. The `cxxtools` binary wraps the
//! external tools a C++ project leans on:
//!
//! * `copyright` - adds the license notice to newly staged files and extends
//!   stale copyright year ranges to the current year
//! * `format check` / `format fix` - runs `clang-format` over the sources
//! * `tidy` - configures CMake, prepares `compile_commands.json`, and runs
//!   `run-clang-tidy`
//!
//! Everything runs synchronously, one external process at a time.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use cxxtools::templates::{ExtensionResolver, TemplateManager};
//! use cxxtools::updater::{CopyrightUpdater, HeaderAction};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let updater = CopyrightUpdater::new(
//!         "Rafal Maziejuk",
//!         2025,
//!         &TemplateManager::new(),
//!         Box::new(ExtensionResolver::builtin()),
//!     )?;
//!
//!     if updater.update_file(Path::new("src/main.cpp"))? == HeaderAction::HeaderAdded {
//!         println!("Added a copyright notice");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`updater`] - Copyright header detection and rewriting
//! * [`templates`] - Notice templates and comment styles
//! * [`exec`] - External command execution
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod collector;
pub mod compile_db;
pub mod config;
pub mod exec;
pub mod file_filter;
pub mod git;
pub mod locate;
pub mod logging;
pub mod output;
pub mod templates;
pub mod updater;
pub mod workspace;
