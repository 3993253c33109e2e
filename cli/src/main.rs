//! # CMDS Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file is the entry point for the `cmds` command-line tool, a thin
//! front end over the `cmds` library. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the `run`, `pipe` and `config` handlers
//! - Turning the final `ShellResult` into output and an exit status
//!
//! ## Examples
//!
//! ```bash
//! # Run shell lines one after another, stopping at the first failure
//! cmds run "cargo fmt --check" "cargo test"
//!
//! # Keep going past failures; all output is concatenated
//! cmds run --keep-going "false" "echo still here"
//!
//! # Pipe stages together
//! cmds pipe "echo 'these three words'" "sed 's/three //'"
//!
//! # Show the effective configuration with debug logging
//! cmds -vv config
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers and shared execution flags.

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "cmds",
    about = "Run shell commands, pipelines and batches with one combined result",
    long_about = "Runs shell lines through a configurable interpreter and reports a single outcome:\n\
                  the captured output on success, or the failing status and message.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// POSIX shell used to run each line as `<PATH> -c <line>` (overrides the configuration files).
    #[arg(long, global = true, value_name = "PATH")]
    shell: Option<String>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    #[command(alias = "p")]
    Pipe(commands::pipe::PipeArgs),
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let shell = cli.shell.as_deref();
    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args, shell),
        Commands::Pipe(args) => commands::pipe::handle_pipe(args, shell),
        Commands::Config(args) => commands::config::handle_config(args, shell),
    };

    match command_result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cmds", "run", "-vv", "--shell", "/bin/sh", "true"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.shell.as_deref(), Some("/bin/sh"));
        assert!(matches!(cli.command, Commands::Run(_)));
    }
}
