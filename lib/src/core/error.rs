//! # CMDS Error Types
//!
//! File: lib/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used by the execution engine. There are
//! two layers:
//!
//! - `CmdsError`: a `thiserror` enum naming every way the engine itself can fail
//!   (a program that cannot be launched, a missing output stream, a bad path...).
//! - `ShError`: the caller-facing failure payload carried by `ShellResult::Failure`.
//!   It holds an exit status and a message.
//!
//! Engine errors never escape a single command's execution. They are converted
//! into an `ShError` with `SENTINEL_STATUS` at the point where they occur, so
//! callers always get a result value back.
//!
//! `Result<T>` is an alias for `anyhow::Result<T>` and is used where context
//! matters more than the concrete type (configuration loading, the CLI).
//!
//! ## Examples
//!
//! ```rust
//! use cmds::{CmdsError, ShError, SENTINEL_STATUS};
//!
//! let err: ShError = CmdsError::NoOutputData.into();
//! assert_eq!(err.status, SENTINEL_STATUS);
//! assert_eq!(err.message, "No data");
//! ```
//!
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reserved status meaning "no real OS exit status is available".
///
/// Used for failures that happen before or without a process exit: spawn
/// failures, missing output, directory changes.
pub const SENTINEL_STATUS: i32 = i32::MIN;

/// Errors raised inside the execution engine.
#[derive(Error, Debug)]
pub enum CmdsError {
    #[error("Failed to launch '{}': {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No data")]
    NoOutputData,

    #[error("Failed to set current directory to '{path}'\n'{component}' does not exist")]
    InvalidPath { path: String, component: String },

    #[error("Command has already been started")]
    AlreadyStarted,

    #[error("Command has not been started")]
    NotStarted,

    #[error("Failed to connect pipe: {0}")]
    Wiring(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A failed execution: the process exit status (or `SENTINEL_STATUS`) and a message.
///
/// For a process that ran and exited non-zero, `message` is whatever the
/// command wrote to its captured output stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ShError {
    pub status: i32,
    pub message: String,
}

impl ShError {
    pub fn new(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// True when `status` is not a real exit code.
    pub fn is_sentinel(&self) -> bool {
        self.status == SENTINEL_STATUS
    }
}

impl From<CmdsError> for ShError {
    fn from(err: CmdsError) -> Self {
        ShError::new(SENTINEL_STATUS, err.to_string())
    }
}

/// Type alias for Result using anyhow::Error, used by configuration loading.
pub type Result<T> = anyhow::Result<T>;
