use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use cxxtools::git::{discover_repo, discover_repo_root, staged_changes};
use tempfile::tempdir;

mod common;
use common::{git_add_and_commit, init_git_repo, is_git_available, run_git, write_file};

fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
  paths.sort();
  paths
}

#[test]
fn test_staged_changes_with_unborn_head() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test_staged_changes_with_unborn_head: git not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  write_file(temp_dir.path(), "src/main.cpp", "int main() {}\n")?;
  write_file(temp_dir.path(), "README.md", "# Readme\n")?;
  run_git(temp_dir.path(), &["add", "."])?;

  let repo = discover_repo(temp_dir.path())?;
  let changes = sorted(staged_changes(&repo)?);

  assert_eq!(changes, vec![PathBuf::from("README.md"), PathBuf::from("src/main.cpp")]);
  Ok(())
}

#[test]
fn test_staged_changes_reports_added_and_modified() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test_staged_changes_reports_added_and_modified: git not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  write_file(temp_dir.path(), "committed.cpp", "int a;\n")?;
  write_file(temp_dir.path(), "untouched.cpp", "int b;\n")?;
  run_git(temp_dir.path(), &["add", "."])?;
  common::git_commit(temp_dir.path(), "Initial commit")?;

  write_file(temp_dir.path(), "committed.cpp", "int a = 1;\n")?;
  write_file(temp_dir.path(), "added.h", "#pragma once\n")?;
  write_file(temp_dir.path(), "unstaged.cpp", "int c;\n")?;
  run_git(temp_dir.path(), &["add", "committed.cpp", "added.h"])?;

  let repo = discover_repo(temp_dir.path())?;
  let changes = sorted(staged_changes(&repo)?);

  assert_eq!(changes, vec![PathBuf::from("added.h"), PathBuf::from("committed.cpp")]);
  Ok(())
}

#[test]
fn test_staged_changes_excludes_deletions() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test_staged_changes_excludes_deletions: git not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  write_file(temp_dir.path(), "doomed.cpp", "int d;\n")?;
  git_add_and_commit(temp_dir.path(), "doomed.cpp", "Initial commit")?;

  run_git(temp_dir.path(), &["rm", "--quiet", "doomed.cpp"])?;
  write_file(temp_dir.path(), "fresh.cpp", "int f;\n")?;
  run_git(temp_dir.path(), &["add", "fresh.cpp"])?;

  let repo = discover_repo(temp_dir.path())?;
  assert_eq!(staged_changes(&repo)?, vec![PathBuf::from("fresh.cpp")]);
  Ok(())
}

#[test]
fn test_staged_changes_empty_after_commit() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test_staged_changes_empty_after_commit: git not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  write_file(temp_dir.path(), "main.cpp", "int main() {}\n")?;
  git_add_and_commit(temp_dir.path(), "main.cpp", "Initial commit")?;

  let repo = discover_repo(temp_dir.path())?;
  assert!(staged_changes(&repo)?.is_empty());
  Ok(())
}

#[test]
fn test_discover_repo_root_from_subdirectory() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test_discover_repo_root_from_subdirectory: git not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  let nested = temp_dir.path().join("src/nested");
  fs::create_dir_all(&nested)?;

  let root = discover_repo_root(&nested).expect("repository should be found");
  assert_eq!(fs::canonicalize(root)?, fs::canonicalize(temp_dir.path())?);
  Ok(())
}

#[test]
fn test_discover_repo_outside_repository() -> Result<()> {
  let temp_dir = tempdir()?;
  // A temp dir could live inside a checkout; only assert when it does not.
  if discover_repo_root(temp_dir.path()).is_none() {
    assert!(discover_repo(temp_dir.path()).is_err());
  }
  Ok(())
}
