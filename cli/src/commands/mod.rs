//! # CMDS Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the `cmds` CLI and the pieces
//! they share:
//! - `ExecFlags`: the execution flags accepted by `run` and `pipe`
//! - `prepare`: loads configuration and installs the global shell config
//! - `report`: prints a `ShellResult` and maps it to an exit status
//!
use anyhow::Context;
use clap::Args;
use cmds::{Config, ExecuteOptions, ShellConfig, ShellResult};
use colored::Colorize;
use std::io::Write;
use tracing::{debug, info};

/// Print the effective configuration.
pub mod config;
/// Pipe shell lines into each other.
pub mod pipe;
/// Run shell lines one after another.
pub mod run;

/// Execution flags shared by `run` and `pipe`.
///
/// They are merged with the options from the configuration files by set union,
/// except `--keep-going`, which removes `TERMINATE_ON_FAILURE`.
#[derive(Args, Debug, Default, Clone)]
pub struct ExecFlags {
    /// Run every command even after one fails, concatenating all output.
    #[arg(long, short = 'k')]
    pub keep_going: bool,

    /// Print each command's arguments to stderr before it starts.
    #[arg(long, short = 'p')]
    pub print_args: bool,

    /// Discard standard output; only the exit status is reported.
    #[arg(long, short = 's')]
    pub silent: bool,
}

impl ExecFlags {
    pub fn resolve(&self, base: ExecuteOptions) -> ExecuteOptions {
        let mut options = base;
        if self.print_args {
            options |= ExecuteOptions::PRINT_ARGUMENTS;
        }
        if self.silent {
            options |= ExecuteOptions::SILENCE_STANDARD_OUT;
        }
        if self.keep_going {
            options = options.difference(ExecuteOptions::TERMINATE_ON_FAILURE);
        }
        options
    }
}

/// Loads the configuration, applies `--shell`, and installs the result as the global shell config.
///
/// `--shell <PATH>` replaces the whole interpreter: lines run as `<PATH> -c <line>`.
pub fn prepare(shell_override: Option<&str>) -> anyhow::Result<Config> {
    if let Some(shell) = shell_override {
        info!("Using interpreter from --shell: {}", shell);
    }
    let cfg = cmds::config::load_config_with_shell(shell_override)
        .context("Failed to load CMDS configuration")?;
    ShellConfig::set_global(cfg.shell_config());
    Ok(cfg)
}

/// Writes the result to the terminal and returns the process exit status.
///
/// Success text goes to stdout verbatim; a failure message goes to stderr in red.
pub fn report(result: &ShellResult) -> anyhow::Result<i32> {
    match result {
        ShellResult::Success(output) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write output")?;
            Ok(0)
        }
        ShellResult::Failure(err) => {
            eprintln!("{}", err.message.trim_end().red());
            debug!("Reporting failure with status {}", err.status);
            Ok(exit_status(err.status))
        }
    }
}

/// Maps a failure status onto a process exit code: real codes pass through, everything else is `1`.
fn exit_status(status: i32) -> i32 {
    if (1..=255).contains(&status) {
        status
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmds::SENTINEL_STATUS;

    #[test]
    fn test_exit_status_mapping() {
        assert_eq!(exit_status(2), 2);
        assert_eq!(exit_status(255), 255);
        assert_eq!(exit_status(SENTINEL_STATUS), 1);
        assert_eq!(exit_status(0), 1);
        assert_eq!(exit_status(300), 1);
    }

    #[test]
    fn test_flags_resolve_against_config_options() {
        let flags = ExecFlags {
            keep_going: true,
            print_args: true,
            silent: false,
        };
        let options = flags.resolve(ExecuteOptions::default());
        assert!(!options.contains(ExecuteOptions::TERMINATE_ON_FAILURE));
        assert!(options.contains(ExecuteOptions::PRINT_ARGUMENTS));

        let base = ExecuteOptions::SILENCE_STANDARD_OUT;
        assert_eq!(ExecFlags::default().resolve(base), base);
    }
}
