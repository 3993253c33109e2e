//! # CMDS Core Infrastructure
//!
//! File: lib/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the foundational types shared by the execution
//! engine:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Engine error types, `ShError`, and the sentinel status
//! - `options`: The `ExecuteOptions` flag set
//! - `result`: `ShellResult` and the combination rule
//! - `shell`: `ShellConfig` and the process-wide interpreter default
//!
//! The `process` module builds on these to spawn, pipe and batch commands.
//!
pub mod config;
pub mod error;
pub mod options;
pub mod result;
pub mod shell;
