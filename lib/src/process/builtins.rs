//! # Built-in Helpers
//!
//! File: lib/src/process/builtins.rs
//! Author: Christi Mahu
//!
//! Small helpers that are handy in scripts next to real commands: `echo`,
//! `cd`, `pwd` and `home`.
//!
//! `cd` returns a `ChangeDirectory` runnable. Executing it changes the
//! working directory of the *whole process*, so it affects every command
//! started afterwards. When the target does not exist, the failure names
//! the first path component that is missing.
//!
use crate::core::error::{CmdsError, Result, ShError, SENTINEL_STATUS};
use crate::core::options::ExecuteOptions;
use crate::core::result::ShellResult;
use crate::process::command::{sh, Command};
use crate::process::Execute;
use anyhow::Context;
use std::env;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// A command printing `message` followed by a newline.
///
/// The message is single-quoted for the shell; an embedded `'` becomes `'\''`.
pub fn echo(message: impl AsRef<str>) -> Command {
    sh(&format!("echo '{}'", message.as_ref().replace('\'', r"'\''")))
}

/// A runnable that changes the process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDirectory {
    path: String,
}

/// Builds a `ChangeDirectory` runnable for `path`.
pub fn cd(path: impl Into<String>) -> ChangeDirectory {
    ChangeDirectory { path: path.into() }
}

impl ChangeDirectory {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Execute for ChangeDirectory {
    fn execute(&mut self, options: ExecuteOptions) -> ShellResult {
        if options.contains(ExecuteOptions::PRINT_ARGUMENTS) {
            eprintln!("cd {}", self.path);
        }
        match env::set_current_dir(&self.path) {
            Ok(()) => {
                debug!("Changed current directory to {}", self.path);
                ShellResult::empty()
            }
            Err(err) => match first_invalid_component(Path::new(&self.path)) {
                Some(component) => CmdsError::InvalidPath {
                    path: self.path.clone(),
                    component,
                }
                .into(),
                None => ShError::new(
                    SENTINEL_STATUS,
                    format!("Failed to set current directory to '{}': {}", self.path, err),
                )
                .into(),
            },
        }
    }
}

/// Walks `path` one component at a time and returns the first one that does not exist.
///
/// Returns `None` when every component exists, or when the walk reaches an
/// existing entry that is not a directory (the OS error describes that case).
fn first_invalid_component(path: &Path) -> Option<String> {
    let mut checked = PathBuf::new();
    for component in path.components() {
        if let Component::Normal(name) = component {
            if checked.exists() && !checked.is_dir() {
                return None;
            }
            checked.push(name);
            if !checked.exists() {
                return Some(name.to_string_lossy().into_owned());
            }
        } else {
            checked.push(component);
        }
    }
    None
}

/// The current working directory.
pub fn pwd() -> Result<PathBuf> {
    env::current_dir().context("Failed to get current directory")
}

/// The current user's home directory, if it can be determined.
pub fn home() -> Option<PathBuf> {
    dirs::home_dir()
}
