//! # Archive Builder
//!
//! File: cli/src/common/archive/create.rs
//! Author: Christi Mahu
//!
//! Packs a file or directory into `<name>.zip` next to it (or in an explicit
//! destination directory), then moves the original to the trash. The
//! container is built in a scratch workspace inside the destination, so a
//! failed build leaves neither a partial container nor a trashed original.
//!
use crate::common::fs::commit::move_to_destination;
use crate::common::fs::workspace::ScratchWorkspace;
use crate::common::system::{ditto, trash, Toolchain};
use crate::core::error::Result;
use anyhow::anyhow;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

const STAGED_ARCHIVE_NAME: &str = "archive.zip";

/// Archives `source` into `destination_dir` and trashes it.
///
/// Returns the path of the committed container.
///
/// # Errors
///
/// Returns an `Err` if building, committing, or trashing fails. The original
/// is only trashed after the container was committed.
pub fn archive_path(tools: &Toolchain, source: &Path, destination_dir: &Path) -> Result<PathBuf> {
    let mut archive_name: OsString = source
        .file_name()
        .ok_or_else(|| anyhow!("Cannot archive {:?}: it has no file name", source))?
        .to_os_string();
    archive_name.push(".zip");

    // The workspace is dropped at the end of this block, before trashing.
    let committed = {
        let workspace = ScratchWorkspace::create_in(destination_dir)?;
        let staged = workspace.join(STAGED_ARCHIVE_NAME);

        info!("Creating archive...");
        ditto::create_zip(tools, source, &staged, source.is_dir())?; // keepParent for directories

        move_to_destination(&staged, destination_dir, &archive_name)?
    };

    // Only reached once the container is committed.
    trash::move_to_trash(tools, source)?;
    Ok(committed)
}
