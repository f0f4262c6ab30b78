//! # Safe Move
//!
//! File: cli/src/common/fs/commit.rs
//! Author: Christi Mahu
//!
//! The single commit point of every operation: a finished result is renamed
//! into the destination directory under a name that does not collide with
//! anything already there. The rename is one filesystem operation, so the
//! destination never observes a partial result. It only succeeds within one
//! filesystem, which is why scratch workspaces live inside the destination.
//!
use crate::common::fs::naming::find_unused_name;
use crate::core::error::Result;
use anyhow::Context;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Renames `source` to `destination_dir/name`, or a numbered variant if that is taken.
///
/// Returns the path the result was committed to.
///
/// # Errors
///
/// Returns an `Err` if the rename fails, e.g. because `source` is on another
/// filesystem than `destination_dir`.
pub fn move_to_destination(source: &Path, destination_dir: &Path, name: &OsStr) -> Result<PathBuf> {
    let target = find_unused_name(&destination_dir.join(name));
    info!("Moving final file to {}...", target.display());
    fs::rename(source, &target)
        .with_context(|| format!("Failed to move {:?} to {:?}", source, target))?;
    Ok(target)
}
