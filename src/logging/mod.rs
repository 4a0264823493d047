//! # Logging Module
//!
//! Logging utilities for cxxtools:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Tracing subscriber setup for structured diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so tool output
//! echoed by the command runner stays separate from diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use cxxtools::logging::{ColorMode, set_verbose};
//! use cxxtools::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! verbose_log!("Scanning directory: {}", "src");
//! info_log!("Updated copyright in: {}", "src/main.cpp");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message in yellow when colors are supported.
///
/// Used by the [`info_log!`] macro.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
