//! # Archive Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Every piece of real work the `archive` tool performs is delegated to an
//! external program (`ditto`, `tar`, `hdiutil`, `GetFileInfo`, `trash`). This
//! module wraps `std::process::Command` so that all of those calls share the
//! same contract:
//!
//! - Calls are **blocking**; the caller waits for the child to exit.
//! - A non-zero exit status becomes `ArchiveError::ExternalCommand`.
//! - A program that cannot be spawned becomes `ArchiveError::ToolUnavailable`.
//! - Standard output and error are inherited, unless the caller asks for the
//!   standard output to be captured (`Invocation::output_text`).
//! - Once the operator has interrupted the run (see `mark_interrupted`), no
//!   further program is started and `ArchiveError::Interrupted` is returned.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::Invocation;
//!
//! Invocation::new("tar")
//!     .arg("-x")
//!     .arg("-C")
//!     .arg(extract_dir)
//!     .arg("-f")
//!     .arg(archive_path)
//!     .run()?;
//! ```
//!
use crate::core::error::{ArchiveError, Result};
use anyhow::anyhow;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Records that the operator interrupted the run.
pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Whether `mark_interrupted` has been called in this process.
pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

fn ensure_not_interrupted() -> Result<()> {
    if was_interrupted() {
        return Err(anyhow!(ArchiveError::Interrupted));
    }
    Ok(())
}

/// A single external program call: program, arguments, and optional text fed to stdin.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
    input: Option<String>,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            input: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends `arg` only when `condition` holds.
    pub fn arg_if(self, condition: bool, arg: impl AsRef<OsStr>) -> Self {
        if condition {
            self.arg(arg)
        } else {
            self
        }
    }

    /// Text written to the child's standard input, which is then closed.
    pub fn stdin_text(mut self, text: impl Into<String>) -> Self {
        self.input = Some(text.into());
        self
    }

    /// Human-readable command line, used in logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command.stdin(if self.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> anyhow::Error {
        anyhow!(ArchiveError::ToolUnavailable {
            program: self.program.to_string_lossy().into_owned(),
            source,
        })
    }

    fn check_status(&self, status: ExitStatus) -> Result<()> {
        if status.success() {
            debug!("Command '{}' completed successfully.", self.display());
            return Ok(());
        }
        ensure_not_interrupted()?; // A tool killed by Ctrl-C reports as an interruption.
        // Signal deaths have no exit code.
        let exit_code = status.code().map_or("?".to_string(), |c| c.to_string());
        error!(
            "Command '{}' failed with exit code {}",
            self.display(),
            exit_code
        );
        Err(anyhow!(ArchiveError::ExternalCommand {
            cmd: self.display(),
            status: exit_code,
        }))
    }

    /// Runs the program with inherited stdout/stderr and waits for it to exit.
    ///
    /// # Errors
    ///
    /// - `ArchiveError::Interrupted` if the run was interrupted before or during the call.
    /// - `ArchiveError::ToolUnavailable` if the program cannot be started.
    /// - `ArchiveError::ExternalCommand` if it exits unsuccessfully.
    pub fn run(&self) -> Result<()> {
        ensure_not_interrupted()?; // Never start a new tool after Ctrl-C.
        info!("Executing command: {}", self.display());
        let mut command = self.command();
        command.stdout(Stdio::inherit()); // Tool output goes straight to the terminal.
        command.stderr(Stdio::inherit());

        let mut child = command.spawn().map_err(|e| self.spawn_error(e))?;
        if let Some(text) = &self.input {
            if let Some(mut stdin) = child.stdin.take() {
                // A child that exits without reading its input is judged by its status alone.
                if let Err(e) = stdin.write_all(text.as_bytes()) {
                    debug!("Could not write to stdin of '{}': {}", self.display(), e);
                }
            } // `stdin` is dropped here, closing the pipe.
        }
        // Block until the tool exits, then map its status.
        let status = child.wait().map_err(|e| self.spawn_error(e))?;
        self.check_status(status)
    }

    /// Runs the program and returns its standard output as text.
    ///
    /// Standard error is still inherited so tool diagnostics reach the operator.
    pub fn output_text(&self) -> Result<String> {
        ensure_not_interrupted()?;
        debug!("Capturing output of command: {}", self.display());
        let mut command = self.command();
        command.stdout(Stdio::piped());
        command.stderr(Stdio::inherit());
        if self.input.is_some() {
            // Input is only supported by `run`.
            command.stdin(Stdio::null());
        }

        let output = command.output().map_err(|e| self.spawn_error(e))?;
        self.check_status(output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
