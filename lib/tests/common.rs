//! # CMDS Library Integration Test Common Helpers
//!
//! File: lib/tests/common.rs
//! Author: Christi Mahu
//!
//! Shared helpers for the library integration tests. Each test file in
//! `lib/tests/` is its own crate and pulls this in with `mod common;`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

use cmds::{sh_with, Command, ExecuteOptions, ShellConfig};

/// A command running `line` under `/usr/bin/env bash -c`, independent of the global config.
pub fn bash(line: &str) -> Command {
    sh_with(line, &ShellConfig::default())
}

/// Default options without `TERMINATE_ON_FAILURE`.
pub fn keep_going() -> ExecuteOptions {
    ExecuteOptions::default().difference(ExecuteOptions::TERMINATE_ON_FAILURE)
}
