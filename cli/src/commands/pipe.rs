//! # CMDS Pipe Handler
//!
//! File: cli/src/commands/pipe.rs
//! Author: Christi Mahu
//!
//! Implements `cmds pipe`: the positional shell lines become the stages of
//! one pipeline, each stage's output feeding the next stage's input. The
//! result is the last stage's output and status.
//!
//! Stages run one after another, so each upstream stage's output must fit in
//! the OS pipe buffer. For larger streams, pipe inside a single line instead:
//! `cmds run "producer | consumer"`.
//!
use super::{prepare, report, ExecFlags};
use clap::Parser;
use cmds::{sh, Execute, PipeChain};
use tracing::{debug, info};

/// # Pipe Arguments (`PipeArgs`)
#[derive(Parser, Debug)]
#[command(about = "Pipe shell lines into each other and report the last stage's result")]
pub struct PipeArgs {
    #[command(flatten)]
    pub flags: ExecFlags,

    /// Pipeline stages, first to last.
    #[arg(required = true, value_name = "STAGE")]
    pub stages: Vec<String>,
}

/// Handles `cmds pipe`, returning the exit status for the process.
pub fn handle_pipe(args: PipeArgs, shell: Option<&str>) -> anyhow::Result<i32> {
    info!("Handling pipe command with {} stage(s)...", args.stages.len());
    debug!("Pipe args: {:?}", args);

    let cfg = prepare(shell)?;
    let options = args.flags.resolve(cfg.execute_options());

    let mut stages = args.stages.iter().map(|stage| sh(stage));
    let Some(first) = stages.next() else {
        anyhow::bail!("No pipeline stages given.");
    };
    let mut chain = stages.fold(PipeChain::new(first), PipeChain::pipe_to);

    let result = chain.execute(options);
    report(&result)
}
