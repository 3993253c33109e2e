//! # CMDS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each `.rs` file
//! there is compiled as a separate test crate and runs the built `cmds`
//! binary through `assert_cmd`.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use tempfile::TempDir;

/// # Get CMDS Command (`cmds_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `cmds` binary.
///
/// The command runs inside `project`, which carries an empty `.git` directory
/// so the project-config search never walks past it, and has colors disabled.
///
/// ## Panics
/// Panics if the `cmds` binary cannot be found via `Command::cargo_bin`.
pub fn cmds_cmd(project: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cmds").expect("Failed to find cmds binary for testing");
    cmd.current_dir(project.path()).env("NO_COLOR", "1");
    cmd
}

/// A temporary project directory, optionally with a `.cmds.toml`.
pub fn project(config: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join(".git")).expect("Failed to create .git");
    if let Some(content) = config {
        std::fs::write(dir.path().join(".cmds.toml"), content).expect("Failed to write .cmds.toml");
    }
    dir
}
