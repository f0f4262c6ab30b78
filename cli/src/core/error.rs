//! # Archive Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout the `archive` tool.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ArchiveError`: A `thiserror` enum for the failures the tool anticipates
//!   (unknown container types, empty images, failing external tools, ...).
//! - `Result<T>`: A type alias for `anyhow::Result<T>` so call sites can attach
//!   context to plain I/O errors.
//!
//! Every `ArchiveError` except `Interrupted` is a *user error*: the entry point
//! prints it as `error: <message>` and exits with status 2. `Interrupted`
//! exits with status 1. Anything that is not an `ArchiveError` is a defect and
//! is left for the Rust runtime to report.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.exists() {
//!     return Err(ArchiveError::SourceNotFound { path: path.to_path_buf() })?;
//! }
//!
//! // Classify an error at the outermost boundary
//! match err.downcast_ref::<ArchiveError>() {
//!     Some(e) => std::process::exit(e.exit_code()),
//!     None => return Err(err),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for user errors.
pub const EXIT_USER_ERROR: i32 = 2;
/// Exit status when the operator interrupted the run.
pub const EXIT_INTERRUPTED: i32 = 1;

/// Custom error type for the `archive` tool.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Unknown file type: {}", .path.display())]
    UnknownFileType { path: PathBuf },

    #[error("No such file or directory: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Destination is not a directory: {}", .path.display())]
    InvalidDestination { path: PathBuf },

    #[error("Nothing to extract from {}", .path.display())]
    NothingToExtract { path: PathBuf },

    #[error("The partition '{name}' is empty.")]
    EmptyPartition { name: String },

    #[error("Command failed: {cmd} (exit status {status})")]
    ExternalCommand { cmd: String, status: String },

    #[error("Could not run '{program}': {source}")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected output from {cmd}: {output:?}")]
    UnexpectedToolOutput { cmd: String, output: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation interrupted.")]
    Interrupted,
}

impl ArchiveError {
    /// The process exit status this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArchiveError::Interrupted => EXIT_INTERRUPTED,
            _ => EXIT_USER_ERROR,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
