//! # Scratch Workspace
//!
//! File: cli/src/common/fs/workspace.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `ScratchWorkspace` is a uniquely named temporary directory
//! (`archive.XXXXXX.tmp`) created *inside* a given parent directory, normally
//! the destination directory of the running operation. Staging work there
//! means the final commit is a rename within one filesystem, and the
//! destination never sees a half-written result.
//!
//! The directory and everything still inside it are deleted when the
//! workspace is dropped, on success and on error alike. Whatever was already
//! renamed out of it is, of course, unaffected.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

const WORKSPACE_PREFIX: &str = "archive.";
const WORKSPACE_SUFFIX: &str = ".tmp";

/// Temporary directory owned by a single operation.
#[derive(Debug)]
pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    /// Creates a new workspace directly inside `parent`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if `parent` does not exist or is not writable.
    pub fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .suffix(WORKSPACE_SUFFIX)
            .tempdir_in(parent)
            .with_context(|| format!("Failed to create scratch workspace in {:?}", parent))?;
        debug!("Created scratch workspace {:?}", dir.path());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the workspace. Nothing is created.
    pub fn join(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Creates the subdirectory `name` and returns its path.
    pub fn create_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.join(name);
        fs::create_dir(&path).with_context(|| format!("Failed to create directory {:?}", path))?;
        Ok(path)
    }
}

impl Drop for ScratchWorkspace {
    fn drop(&mut self) {
        debug!("Removing scratch workspace {:?}", self.path());
    }
}
