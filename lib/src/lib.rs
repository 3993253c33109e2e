//! # CMDS
//!
//! File: lib/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! CMDS runs external commands declaratively and hands back one combined
//! outcome instead of raw subprocess plumbing. A caller describes a single
//! command, a pipeline, or a batch of independent commands, and gets a
//! `ShellResult` back: the captured output, or an exit status and message.
//!
//! ## Architecture
//!
//! - `core`: shared infrastructure: `ExecuteOptions`, `ShellConfig`,
//!   `ShellResult`, error types and configuration file loading.
//! - `process`: the engine: `Command`, `PipeChain`, `execute_all` and the
//!   `cd`/`echo` helpers.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use cmds::{cd, echo, execute_all, sh, Execute, ExecuteOptions};
//!
//! // A single command.
//! let version = sh("uname -s").execute(ExecuteOptions::default());
//!
//! // A pipeline.
//! let words = sh("echo 'these three words'")
//!     .pipe_to("sed 's/three //'")
//!     .execute(ExecuteOptions::default());
//! assert_eq!(words.success(), Ok("these words\n"));
//!
//! // A batch: stops at the first failure by default.
//! let script: Vec<Box<dyn Execute>> = vec![
//!     Box::new(cd("/tmp")),
//!     Box::new(echo("in tmp")),
//!     Box::new(sh("pwd")),
//! ];
//! let result = execute_all(script, ExecuteOptions::default());
//! ```
//!
pub mod core;
pub mod process;

pub use crate::core::config::{self, Config};
pub use crate::core::error::{CmdsError, Result, ShError, SENTINEL_STATUS};
pub use crate::core::options::ExecuteOptions;
pub use crate::core::result::ShellResult;
pub use crate::core::shell::ShellConfig;
pub use crate::process::batch::execute_all;
pub use crate::process::builtins::{cd, echo, home, pwd, ChangeDirectory};
pub use crate::process::command::{sh, sh_with, Command, CommandState, ErrorOutput, Input};
pub use crate::process::pipe::PipeChain;
pub use crate::process::Execute;
