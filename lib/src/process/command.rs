//! # Runnable Commands
//!
//! File: lib/src/process/command.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `Command` is one spawnable OS process together with its I/O wiring:
//! an executable path, an argument list, and three endpoints (stdin, stdout,
//! stderr). It moves through three states: not started, running, and exited.
//!
//! Commands are built either from a literal shell line (`sh`, or `From<&str>`),
//! which wraps the line in the configured interpreter, or explicitly with
//! `Command::new(program).arg(..)`.
//!
//! ## Output capture
//!
//! By default stdout is captured through an anonymous pipe created when the
//! process starts, and stderr is merged into the same pipe. A failing command's
//! message is therefore whatever it printed, error text included.
//!
//! `wait_and_collect` reads the captured stream to EOF and then reaps the
//! child. The result is:
//! - exit 0: `Success(text)`
//! - non-zero exit: `Failure(status, text)`
//! - no readable stream, or bytes that are not UTF-8: `Failure(SENTINEL_STATUS, "No data")`
//!
//! With `SILENCE_STANDARD_OUT`, stdout goes to the null device and only the
//! exit status matters: `Success("")` or
//! `Failure(status, "Terminated with exit code <status>")`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cmds::{sh, Command, Execute, ExecuteOptions};
//!
//! let mut listing = sh("ls -1 /");
//! let result = listing.execute(ExecuteOptions::default());
//! println!("{}", result.output_or_message());
//!
//! let mut explicit = Command::new("printf").args(["%s-%s", "a", "b"]);
//! assert_eq!(explicit.execute(ExecuteOptions::default()).success(), Ok("a-b"));
//! ```
//!
use crate::core::error::{CmdsError, SENTINEL_STATUS};
use crate::core::options::ExecuteOptions;
use crate::core::result::ShellResult;
use crate::core::shell::ShellConfig;
use crate::process::Execute;
use std::io::{self, PipeReader, PipeWriter, Read};
use std::path::{Path, PathBuf};
use std::process::{self, Child, ExitStatus, Stdio};
use tracing::{debug, info};

/// Where a command reads its standard input from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Input {
    /// Share the parent's stdin.
    #[default]
    Inherit,
    /// Read from the null device (immediate EOF).
    Null,
}

/// Where a command's standard error goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorOutput {
    /// Into the same stream as stdout (captured together).
    #[default]
    Merged,
    /// Share the parent's stderr.
    Inherit,
    /// Discard.
    Null,
}

/// Lifecycle of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    NotStarted,
    Running,
    Exited(i32),
}

#[derive(Debug)]
enum Stdin {
    Inherit,
    Null,
    Pipe(PipeReader),
}

#[derive(Debug)]
enum Stdout {
    /// A fresh pipe is created at start and read by `wait_and_collect`.
    Capture,
    /// Write end of a pipe feeding the next pipeline stage.
    Pipe(PipeWriter),
    Null,
}

/// One spawnable process and its I/O wiring.
#[derive(Debug)]
pub struct Command {
    program: PathBuf,
    args: Vec<String>,
    stdin: Stdin,
    stdout: Stdout,
    stderr: ErrorOutput,
    capture: Option<PipeReader>,
    child: Option<Child>,
    state: CommandState,
}

impl Command {
    /// A command running `program` with no arguments, capturing stdout and stderr together.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: Stdin::Inherit,
            stdout: Stdout::Capture,
            stderr: ErrorOutput::Merged,
            capture: None,
            child: None,
            state: CommandState::NotStarted,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replaces the stdin source. Has no effect on a stage that already reads from a pipe.
    pub fn stdin(mut self, input: Input) -> Self {
        if !matches!(self.stdin, Stdin::Pipe(_)) {
            self.stdin = match input {
                Input::Inherit => Stdin::Inherit,
                Input::Null => Stdin::Null,
            };
        }
        self
    }

    pub fn stderr(mut self, target: ErrorOutput) -> Self {
        self.stderr = target;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Program and arguments joined by spaces, as shown by `PRINT_ARGUMENTS`.
    pub fn display_arguments(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.display().to_string());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Sends stdout to the null device. Only meaningful before `start`.
    pub(crate) fn silence_output(&mut self) {
        self.stdout = Stdout::Null;
    }

    /// Wires this command's stdout to `downstream`'s stdin through a new pipe,
    /// and gives `downstream` a fresh captured stdout.
    ///
    /// A merged stderr on this side is discarded; only stdout flows down the pipe.
    pub(crate) fn connect_to(&mut self, downstream: &mut Command) -> Result<(), CmdsError> {
        if self.state != CommandState::NotStarted || downstream.state != CommandState::NotStarted {
            return Err(CmdsError::AlreadyStarted);
        }
        let (reader, writer) = io::pipe().map_err(|e| CmdsError::Wiring(e.to_string()))?;
        self.stdout = Stdout::Pipe(writer);
        if self.stderr == ErrorOutput::Merged {
            self.stderr = ErrorOutput::Null;
        }
        downstream.stdin = Stdin::Pipe(reader);
        downstream.stdout = Stdout::Capture;
        debug!(
            "Piped '{}' into '{}'",
            self.display_arguments(),
            downstream.display_arguments()
        );
        Ok(())
    }

    /// Spawns the process with the current arguments and endpoints.
    ///
    /// Endpoints are handed to the child and released here, so a downstream
    /// reader sees EOF once this process exits. If the spawn fails they are
    /// kept, and the command can be started again.
    ///
    /// # Errors
    ///
    /// - `CmdsError::AlreadyStarted` if the command was started before.
    /// - `CmdsError::Spawn` if the executable cannot be launched.
    /// - `CmdsError::Io` if the capture pipe cannot be created.
    pub fn start(&mut self, options: ExecuteOptions) -> Result<(), CmdsError> {
        if self.state != CommandState::NotStarted {
            return Err(CmdsError::AlreadyStarted);
        }
        if options.contains(ExecuteOptions::PRINT_ARGUMENTS) {
            eprintln!("{}", self.display_arguments());
        }

        let mut command = process::Command::new(&self.program);
        command.args(&self.args);

        command.stdin(match &self.stdin {
            Stdin::Inherit => Stdio::inherit(),
            Stdin::Null => Stdio::null(),
            Stdin::Pipe(reader) => Stdio::from(reader.try_clone()?),
        });

        let mut capture = None;
        let writer = match &self.stdout {
            Stdout::Capture => {
                let (reader, writer) = io::pipe()?;
                capture = Some(reader);
                Some(writer)
            }
            Stdout::Pipe(writer) => Some(writer.try_clone()?),
            Stdout::Null => None,
        };
        command.stderr(match (self.stderr, &writer) {
            (ErrorOutput::Merged, Some(writer)) => Stdio::from(writer.try_clone()?),
            (ErrorOutput::Merged, None) | (ErrorOutput::Null, _) => Stdio::null(),
            (ErrorOutput::Inherit, _) => Stdio::inherit(),
        });
        command.stdout(writer.map_or_else(Stdio::null, Stdio::from));

        let spawned = command.spawn();
        // The builder still owns the parent's copies of the pipe ends.
        drop(command);
        let child = spawned.map_err(|source| CmdsError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        // The child holds its own copies now; ours must close for EOF to propagate.
        self.stdin = Stdin::Null;
        self.stdout = Stdout::Null;
        self.capture = capture;

        debug!("Started '{}' (pid {})", self.display_arguments(), child.id());
        self.child = Some(child);
        self.state = CommandState::Running;
        Ok(())
    }

    /// Blocks until the process exits and returns its exit status.
    pub fn wait(&mut self) -> Result<i32, CmdsError> {
        match self.state {
            CommandState::Exited(status) => return Ok(status),
            CommandState::NotStarted => return Err(CmdsError::NotStarted),
            CommandState::Running => {}
        }
        let mut child = self.child.take().ok_or(CmdsError::NotStarted)?;
        let status = exit_code(child.wait()?);
        debug!("'{}' exited with status {}", self.display_arguments(), status);
        self.state = CommandState::Exited(status);
        Ok(status)
    }

    /// Waits for the process and turns its exit status and output into a `ShellResult`.
    pub fn wait_and_collect(&mut self, options: ExecuteOptions) -> ShellResult {
        if options.contains(ExecuteOptions::SILENCE_STANDARD_OUT) {
            self.capture = None;
            return match self.wait() {
                Ok(0) => ShellResult::empty(),
                Ok(status) => {
                    ShellResult::failure(status, format!("Terminated with exit code {status}"))
                }
                Err(err) => err.into(),
            };
        }

        // Drain before reaping so a chatty process cannot fill the pipe and stall.
        let output = self.read_capture();
        let status = match self.wait() {
            Ok(status) => status,
            Err(err) => return err.into(),
        };
        match output {
            Err(err) => err.into(),
            Ok(text) if status == 0 => ShellResult::Success(text),
            Ok(text) => {
                info!(
                    "'{}' failed with exit status {}",
                    self.display_arguments(),
                    status
                );
                ShellResult::failure(status, text)
            }
        }
    }

    fn read_capture(&mut self) -> Result<String, CmdsError> {
        let mut reader = self.capture.take().ok_or(CmdsError::NoOutputData)?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| CmdsError::NoOutputData)
    }
}

impl Execute for Command {
    fn execute(&mut self, options: ExecuteOptions) -> ShellResult {
        if options.contains(ExecuteOptions::SILENCE_STANDARD_OUT)
            && self.state == CommandState::NotStarted
        {
            self.silence_output();
        }
        if let Err(err) = self.start(options) {
            info!("Could not start '{}': {}", self.display_arguments(), err);
            return err.into();
        }
        self.wait_and_collect(options)
    }
}

/// Builds a command running `line` through the process-wide `ShellConfig`.
///
/// An empty line runs `echo`.
pub fn sh(line: &str) -> Command {
    sh_with(line, &ShellConfig::global())
}

/// Builds a command running `line` through an explicit `ShellConfig`.
pub fn sh_with(line: &str, config: &ShellConfig) -> Command {
    let line = if line.is_empty() { "echo" } else { line };
    Command::new(&config.executable).args(config.arguments_for(line))
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        sh(line)
    }
}

impl From<String> for Command {
    fn from(line: String) -> Self {
        sh(&line)
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    SENTINEL_STATUS
}
