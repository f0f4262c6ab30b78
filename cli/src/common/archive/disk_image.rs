//! # Disk Image Extraction
//!
//! File: cli/src/common/archive/disk_image.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Disk images cannot be unpacked like zip or tar containers; they are
//! mounted read-only below a private `mounts` directory of the scratch
//! workspace, and the visible members of each partition are copied into
//! `extracted/<partition>/`. The image is unmounted before the result is
//! chosen, whether or not copying succeeded.
//!
//! A member is skipped when any of these holds:
//! - its name starts with a dot (`.DS_Store`, `.background`, `.Trashes`);
//! - it is a symbolic link;
//! - `GetFileInfo` reports it as a Finder alias (the usual `Applications` shortcut);
//! - `GetFileInfo` reports it as invisible.
//!
use crate::common::archive::normalize::{promote_partitions, CandidateResult, PartitionCopy};
use crate::common::fs::io::{is_hidden_name, is_symlink, list_entry_names};
use crate::common::fs::workspace::ScratchWorkspace;
use crate::common::system::hdiutil::MountSession;
use crate::common::system::{ditto, file_info, Toolchain};
use crate::core::error::Result;
use anyhow::Context;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tracing::info;

const MOUNTS_DIR: &str = "mounts";
const EXTRACTED_DIR: &str = "extracted";

/// Mounts `image`, copies its partitions into `workspace` and picks the result.
pub fn extract_partitions(
    tools: &Toolchain,
    image: &Path,
    workspace: &ScratchWorkspace,
    image_stem: &OsStr,
) -> Result<CandidateResult> {
    let mount_root = workspace.create_dir(MOUNTS_DIR)?;
    let extracted = workspace.create_dir(EXTRACTED_DIR)?;

    let session = MountSession::open(tools, image, &mount_root)?;
    let copied = copy_partitions(tools, &session, &extracted);
    // Unmount whether or not copying worked; a copy error wins over a detach error.
    let closed = session.close();
    let partitions = copied?;
    closed?;

    promote_partitions(&extracted, &partitions, image, image_stem)
}

fn copy_partitions(
    tools: &Toolchain,
    session: &MountSession<'_>,
    extracted: &Path,
) -> Result<Vec<PartitionCopy>> {
    let mut partitions = Vec::new();
    for name in session.partitions()? {
        info!("Copying partition {}...", name.to_string_lossy());
        let source = session.mount_root().join(&name);
        let target = extracted.join(&name);
        fs::create_dir(&target)
            .with_context(|| format!("Failed to create directory {:?}", target))?;

        let mut members = Vec::new();
        // Sorted, so skips and copies log in a stable order.
        for member in list_entry_names(&source)? {
            let member_path = source.join(&member);
            if should_skip(tools, &member, &member_path)? {
                info!("Skipping {}", member_path.display());
                continue;
            }
            ditto::copy_preserving(tools, &member_path, &target.join(&member))?;
            members.push(member);
        }
        partitions.push(PartitionCopy { name, members });
    }
    Ok(partitions)
}

fn should_skip(tools: &Toolchain, name: &OsStr, path: &Path) -> Result<bool> {
    Ok(is_hidden_name(name)
        || is_symlink(path)
        || file_info::is_alias(tools, path)?
        || file_info::is_invisible(tools, path)?)
}
