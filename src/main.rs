//! # cxxtools
//!
//! Developer tooling for a C++ repository.

use std::process::ExitCode;

use cxxtools::cli::{Cli, run};

fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run(cli) {
    Ok(code) => ExitCode::from(code),
    Err(e) => {
      eprintln!("ERROR: {e:#}");
      ExitCode::FAILURE
    }
  }
}
