use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use cxxtools::cli::{TidyArgs, Toolbox, run_tidy};
use cxxtools::compile_db::COMPILE_COMMANDS_FILE;
use cxxtools::config::TidyConfig;
use cxxtools::locate::StaticLocator;
use tempfile::tempdir;

mod common;
use common::FakeRunner;

const RAW_DATABASE: &str = r#"[
  {
    "directory": "/repo/build",
    "command": "clang++ -I/repo/include -I/repo/third_party/fmt/include @CMakeFiles/app.dir/main.cpp.o.modmap -c /repo/src/main.cpp",
    "file": "/repo/src/main.cpp"
  }
]
"#;

fn tidy_locator() -> StaticLocator {
  StaticLocator::new()
    .with_tool("clang-tidy", "/opt/llvm/bin/clang-tidy")
    .with_tool("run-clang-tidy", "/opt/llvm/bin/run-clang-tidy")
    .with_tool("python3", "/usr/bin/python3")
}

/// Runner that emulates CMake writing the compile database.
fn cmake_emulating_runner(build_dir: PathBuf, exit_codes: &[i32]) -> FakeRunner {
  FakeRunner::with_exit_codes(exit_codes).with_hook(move |command| {
    if command.program().ends_with("cmake") {
      fs::create_dir_all(&build_dir).expect("create build dir");
      fs::write(build_dir.join(COMPILE_COMMANDS_FILE), RAW_DATABASE).expect("write compile database");
    }
  })
}

#[test]
fn test_tidy_runs_configure_rewrite_and_driver() -> Result<()> {
  let temp_dir = tempdir()?;
  let build_dir = temp_dir.path().join("out");
  let locator = tidy_locator();
  let runner = cmake_emulating_runner(build_dir.clone(), &[]);
  let toolbox = Toolbox {
    locator: &locator,
    runner: &runner,
  };

  let args = TidyArgs {
    dir: Some(build_dir.clone()),
  };
  assert_eq!(run_tidy(&args, &TidyConfig::default(), &toolbox)?, 0);

  let build = build_dir.display().to_string();
  assert_eq!(
    runner.rendered_calls(),
    vec![
      format!("cmake -B \"{build}\" --preset clang-tidy -DCMAKE_EXPORT_COMPILE_COMMANDS=ON"),
      format!(
        "\"/usr/bin/python3\" \"/opt/llvm/bin/run-clang-tidy\" -clang-tidy-binary \"/opt/llvm/bin/clang-tidy\" -p \"{build}\""
      ),
    ]
  );

  let database = fs::read_to_string(build_dir.join(COMPILE_COMMANDS_FILE))?;
  assert!(database.contains("-I/repo/include -isystem /repo/third_party/fmt/include  -c /repo/src/main.cpp"));
  assert!(!database.contains(".modmap"));
  Ok(())
}

#[test]
fn test_tidy_uses_configured_preset_and_build_dir() -> Result<()> {
  let temp_dir = tempdir()?;
  let build_dir = temp_dir.path().join("cfg-build");
  let locator = tidy_locator();
  let runner = cmake_emulating_runner(build_dir.clone(), &[]);
  let toolbox = Toolbox {
    locator: &locator,
    runner: &runner,
  };

  let config = TidyConfig {
    preset: "ci-tidy".to_string(),
    build_dir: build_dir.clone(),
  };
  assert_eq!(run_tidy(&TidyArgs::default(), &config, &toolbox)?, 0);

  let calls = runner.rendered_calls();
  assert_eq!(
    calls[0],
    format!(
      "cmake -B \"{}\" --preset ci-tidy -DCMAKE_EXPORT_COMPILE_COMMANDS=ON",
      build_dir.display()
    )
  );
  Ok(())
}

#[test]
fn test_tidy_missing_prerequisites() -> Result<()> {
  let locator = StaticLocator::new().with_tool("clang-tidy", "/opt/llvm/bin/clang-tidy");
  let runner = FakeRunner::new();
  let toolbox = Toolbox {
    locator: &locator,
    runner: &runner,
  };

  assert_eq!(run_tidy(&TidyArgs::default(), &TidyConfig::default(), &toolbox)?, 1);
  assert!(runner.calls.borrow().is_empty());
  Ok(())
}

#[test]
fn test_tidy_stops_when_configure_fails() -> Result<()> {
  let temp_dir = tempdir()?;
  let build_dir = temp_dir.path().join("build");
  let locator = tidy_locator();
  let runner = FakeRunner::with_exit_codes(&[1]);
  let toolbox = Toolbox {
    locator: &locator,
    runner: &runner,
  };

  let args = TidyArgs {
    dir: Some(build_dir),
  };
  assert_eq!(run_tidy(&args, &TidyConfig::default(), &toolbox)?, 1);
  assert_eq!(runner.calls.borrow().len(), 1);
  Ok(())
}

#[test]
fn test_tidy_fails_without_compile_database() -> Result<()> {
  let temp_dir = tempdir()?;
  let locator = tidy_locator();
  // Configure "succeeds" but never produces compile_commands.json
  let runner = FakeRunner::new();
  let toolbox = Toolbox {
    locator: &locator,
    runner: &runner,
  };

  let args = TidyArgs {
    dir: Some(temp_dir.path().join("build")),
  };
  assert_eq!(run_tidy(&args, &TidyConfig::default(), &toolbox)?, 1);
  assert_eq!(runner.calls.borrow().len(), 1);
  Ok(())
}

#[test]
fn test_tidy_reports_driver_failure() -> Result<()> {
  let temp_dir = tempdir()?;
  let build_dir = temp_dir.path().join("build");
  let locator = tidy_locator();
  let runner = cmake_emulating_runner(build_dir.clone(), &[0, 1]);
  let toolbox = Toolbox {
    locator: &locator,
    runner: &runner,
  };

  let args = TidyArgs {
    dir: Some(build_dir),
  };
  assert_eq!(run_tidy(&args, &TidyConfig::default(), &toolbox)?, 1);
  assert_eq!(runner.calls.borrow().len(), 2);
  Ok(())
}
