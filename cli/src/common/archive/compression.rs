//! # Filesystem Compressor
//!
//! File: cli/src/common/archive/compression.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Applies native filesystem compression by letting the container tool
//! transcode a path into a scratch workspace (`ditto --hfsCompression`) and
//! then putting the compressed copy where it belongs. The logical content is
//! never changed, so compressing already-compressed content again yields the
//! same tree.
//!
//! ## Architecture
//!
//! - `compress_in_place`: The `--fs-compress` mode. A compressed directory
//!   copy is merged file by file over the original (see
//!   `common::fs::merge`); a compressed file simply replaces the original.
//! - `compress_into`: The last step of an extraction. The compressed copy of
//!   the candidate result is committed to the destination directory under
//!   the candidate's name.
//!
use crate::common::fs::commit::move_to_destination;
use crate::common::fs::io::is_real_dir;
use crate::common::fs::merge::merge_directory_into;
use crate::common::fs::workspace::ScratchWorkspace;
use crate::common::system::{ditto, Toolchain};
use crate::core::error::Result;
use anyhow::{anyhow, Context};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const COPY_NAME: &str = "copy";

/// Compresses the file or directory at `path` without moving it.
pub fn compress_in_place(tools: &Toolchain, path: &Path) -> Result<()> {
    info!("Applying file system compression...");
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("Cannot compress {:?}: it has no parent directory", path))?;

    let workspace = ScratchWorkspace::create_in(parent)?;
    let copy = workspace.join(COPY_NAME);
    ditto::copy_compressed(tools, path, &copy)?;

    if is_real_dir(&copy) {
        info!("Moving compressed files into {}...", path.display());
        merge_directory_into(&copy, path)
    } else {
        info!("Moving compressed file to {}...", path.display());
        fs::rename(&copy, path).with_context(|| format!("Failed to replace {:?}", path))
    }
}

/// Writes a compressed copy of `source` to `destination_dir` under `name`.
///
/// Returns the committed path, which may carry a numeric suffix if `name` was taken.
pub fn compress_into(
    tools: &Toolchain,
    source: &Path,
    destination_dir: &Path,
    name: &OsStr,
) -> Result<PathBuf> {
    info!("Applying file system compression...");
    let workspace = ScratchWorkspace::create_in(destination_dir)?;
    let copy = workspace.join(COPY_NAME);
    ditto::copy_compressed(tools, source, &copy)?;
    move_to_destination(&copy, destination_dir, name)
}
