//! # CMDS Config Handler
//!
//! File: cli/src/commands/config.rs
//! Author: Christi Mahu
//!
//! Implements `cmds config`: prints the merged configuration (defaults, user
//! file, project file, `--shell`) as TOML. Useful to check which interpreter
//! and options `run` and `pipe` will use from the current directory.
//!
use super::prepare;
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// # Config Arguments (`ConfigArgs`)
#[derive(Parser, Debug)]
#[command(about = "Show the effective configuration")]
pub struct ConfigArgs {}

pub fn handle_config(_args: ConfigArgs, shell: Option<&str>) -> anyhow::Result<i32> {
    info!("Handling config command...");
    let cfg = prepare(shell)?;
    let rendered = cfg
        .to_toml_string()
        .context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(0)
}
