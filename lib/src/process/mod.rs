//! # CMDS Process Execution (`process`)
//!
//! File: lib/src/process/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module is the execution engine. It spawns external processes, wires
//! pipes between them, and runs batches of them:
//!
//! - **`command`**: `Command`, one spawnable process with its I/O endpoints,
//!   plus `sh()` for turning a shell line into a `Command`.
//! - **`pipe`**: `PipeChain`, commands connected stdout-to-stdin and run in order.
//! - **`batch`**: `execute_all`, independent runnables folded into one result.
//! - **`builtins`**: `echo`, `cd`, `pwd`, `home`.
//!
//! Everything that can be run implements `Execute`. Execution is synchronous:
//! each call blocks the calling thread until the processes involved have exited.
//!
use crate::core::options::ExecuteOptions;
use crate::core::result::ShellResult;

pub mod batch;
pub mod builtins;
pub mod command;
pub mod pipe;

/// Something that can be run once to produce a `ShellResult`.
///
/// Errors never escape `execute`; they come back as `ShellResult::Failure`.
pub trait Execute {
    fn execute(&mut self, options: ExecuteOptions) -> ShellResult;
}

impl<T: Execute + ?Sized> Execute for Box<T> {
    fn execute(&mut self, options: ExecuteOptions) -> ShellResult {
        (**self).execute(options)
    }
}

impl<T: Execute + ?Sized> Execute for &mut T {
    fn execute(&mut self, options: ExecuteOptions) -> ShellResult {
        (**self).execute(options)
    }
}
