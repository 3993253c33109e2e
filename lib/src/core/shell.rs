//! # Shell Configuration
//!
//! File: lib/src/core/shell.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `ShellConfig` says how a literal command line is turned into a process:
//! the interpreter to launch and the arguments placed before the literal text.
//! The default is `/usr/bin/env bash -c <line>`.
//!
//! A process-wide default is kept behind an `RwLock`. It is read by `sh()`
//! every time a command is built from a string. Programs that want a
//! different interpreter override it once at startup, before building any
//! commands:
//!
//! ```rust
//! use cmds::ShellConfig;
//!
//! ShellConfig::set_global(ShellConfig::new("/bin/sh", ["-c"]));
//! assert_eq!(ShellConfig::global().executable.to_str(), Some("/bin/sh"));
//! # ShellConfig::set_global(ShellConfig::default());
//! ```
//!
use std::path::PathBuf;
use std::sync::{LazyLock, PoisonError, RwLock};
use tracing::debug;

pub const DEFAULT_EXECUTABLE: &str = "/usr/bin/env";
pub const DEFAULT_INITIAL_ARGUMENTS: [&str; 2] = ["bash", "-c"];

static GLOBAL: LazyLock<RwLock<ShellConfig>> =
    LazyLock::new(|| RwLock::new(ShellConfig::default()));

/// Interpreter path plus the arguments that precede a literal command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub executable: PathBuf,
    pub initial_arguments: Vec<String>,
}

impl ShellConfig {
    pub fn new<P, I, S>(executable: P, initial_arguments: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            executable: executable.into(),
            initial_arguments: initial_arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// A copy of the process-wide default.
    pub fn global() -> ShellConfig {
        // The lock only guards a plain value, so a poisoned lock still holds a usable config.
        GLOBAL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the process-wide default used by `sh()`.
    pub fn set_global(config: ShellConfig) {
        debug!("Setting global shell configuration: {:?}", config);
        *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// The full argument list for `line`: the initial arguments followed by the line itself.
    pub fn arguments_for(&self, line: &str) -> Vec<String> {
        let mut args = self.initial_arguments.clone();
        args.push(line.to_string());
        args
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTABLE, DEFAULT_INITIAL_ARGUMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wraps_line_in_bash() {
        let config = ShellConfig::default();
        assert_eq!(config.executable, PathBuf::from("/usr/bin/env"));
        assert_eq!(
            config.arguments_for("echo hi"),
            vec!["bash", "-c", "echo hi"]
        );
    }

    #[test]
    fn test_custom_config() {
        let config = ShellConfig::new("/bin/sh", ["-e", "-c"]);
        assert_eq!(config.arguments_for("true"), vec!["-e", "-c", "true"]);
    }
}
