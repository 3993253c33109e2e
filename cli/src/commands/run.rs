//! # CMDS Run Handler
//!
//! File: cli/src/commands/run.rs
//! Author: Christi Mahu
//!
//! Implements `cmds run`: each positional argument is one shell line, and the
//! lines run as an independent batch (no piping between them).
//!
//! ```bash
//! cmds run "echo one" "echo two"          # prints "one\ntwo\n"
//! cmds run "false" "echo never"           # exits 1, "echo never" is not run
//! cmds run -k "printf x" "false" "printf y"   # prints "xy", exits 0
//! ```
//!
use super::{prepare, report, ExecFlags};
use clap::Parser;
use cmds::{execute_all, sh};
use tracing::{debug, info};

/// # Run Arguments (`RunArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "Run shell lines one after another",
    long_about = "Runs each LINE through the configured interpreter, in order.\n\
                  By default the first failing line stops the batch and its status is returned."
)]
pub struct RunArgs {
    #[command(flatten)]
    pub flags: ExecFlags,

    /// Shell lines to execute, in order.
    #[arg(required = true, value_name = "LINE")]
    pub lines: Vec<String>,
}

/// Handles `cmds run`, returning the exit status for the process.
pub fn handle_run(args: RunArgs, shell: Option<&str>) -> anyhow::Result<i32> {
    info!("Handling run command...");
    debug!("Run args: {:?}", args);

    let cfg = prepare(shell)?;
    let options = args.flags.resolve(cfg.execute_options());
    debug!("Effective options: {:?}", options);

    let result = execute_all(args.lines.iter().map(|line| sh(line)), options);
    report(&result)
}
