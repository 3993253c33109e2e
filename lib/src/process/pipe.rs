//! # Pipe Chains
//!
//! File: lib/src/process/pipe.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `PipeChain` is an ordered list of commands where each stage's stdout
//! feeds the next stage's stdin. Chains are built left to right with
//! `pipe_to`, and the pipes are wired immediately, when the stage is
//! appended rather than when the chain runs. Stages are kept oldest first,
//! so execution order is simply the storage order.
//!
//! ## Execution order
//!
//! `execute` starts each stage and waits for it to exit before starting the
//! next one. It never starts a downstream stage before its upstream. The chain's
//! result is the last stage's captured outcome; earlier stages' exit statuses
//! are discarded.
//!
//! Because an upstream stage must finish before its reader starts, everything
//! it writes has to fit in the OS pipe buffer (typically 64 KiB on Linux).
//! A stage producing more than that before exiting blocks forever.
//!
//! If a stage fails to spawn, the chain stops there and that failure is the
//! result; downstream stages never start.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cmds::{sh, Execute, ExecuteOptions};
//!
//! let mut chain = sh("echo 'these three words'").pipe_to("sed 's/three //'");
//! let result = chain.execute(ExecuteOptions::default());
//! assert_eq!(result.success(), Ok("these words\n"));
//! ```
//!
use crate::core::error::CmdsError;
use crate::core::options::ExecuteOptions;
use crate::core::result::ShellResult;
use crate::process::command::Command;
use crate::process::Execute;
use tracing::{debug, info, warn};

/// Commands connected stdout-to-stdin, executed as one unit.
#[derive(Debug)]
pub struct PipeChain {
    stages: Vec<Command>,
    wiring_error: Option<CmdsError>,
    executed: bool,
}

impl PipeChain {
    /// A chain with a single stage.
    pub fn new(first: impl Into<Command>) -> Self {
        Self {
            stages: vec![first.into()],
            wiring_error: None,
            executed: false,
        }
    }

    /// Appends `to`, reading from the current last stage's output.
    ///
    /// If the pipe cannot be created the error is kept and reported when the
    /// chain is executed.
    pub fn pipe_to(mut self, to: impl Into<Command>) -> Self {
        let mut to = to.into();
        if self.wiring_error.is_none() {
            if let Some(last) = self.stages.last_mut() {
                if let Err(err) = last.connect_to(&mut to) {
                    warn!("Failed to wire pipeline stage {}: {}", self.stages.len() + 1, err);
                    self.wiring_error = Some(err);
                }
            }
        }
        self.stages.push(to);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The stages in execution order.
    pub fn stages(&self) -> &[Command] {
        &self.stages
    }
}

impl Command {
    /// Starts a chain with this command feeding `to`.
    pub fn pipe_to(self, to: impl Into<Command>) -> PipeChain {
        PipeChain::new(self).pipe_to(to)
    }
}

impl Execute for PipeChain {
    fn execute(&mut self, options: ExecuteOptions) -> ShellResult {
        if self.executed {
            return CmdsError::AlreadyStarted.into();
        }
        self.executed = true;
        if let Some(err) = self.wiring_error.take() {
            return err.into();
        }

        let count = self.stages.len();
        debug!("Executing pipeline with {} stage(s)", count);
        for (index, stage) in self.stages.iter_mut().enumerate() {
            let is_last = index + 1 == count;
            if is_last && options.contains(ExecuteOptions::SILENCE_STANDARD_OUT) {
                stage.silence_output();
            }
            if let Err(err) = stage.start(options) {
                info!("Pipeline stopped at stage {}: {}", index + 1, err);
                return err.into();
            }
            if is_last {
                return stage.wait_and_collect(options);
            }
            match stage.wait() {
                Ok(status) => debug!("Pipeline stage {} exited with status {}", index + 1, status),
                Err(err) => return err.into(),
            }
        }
        CmdsError::NoOutputData.into()
    }
}
