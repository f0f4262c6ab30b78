//! # Content Normalizer
//!
//! File: cli/src/common/archive/normalize.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Decides what a freshly extracted container becomes at the destination.
//! A container holding a single visible item is unwrapped to that item under
//! its own name; a container holding several items becomes one directory
//! named after the container.
//!
//! ## Rules
//!
//! For zip and tar containers (`normalize_extracted`):
//! 1. Every direct entry whose name starts with a dot is deleted (directories
//!    recursively).
//! 2. No visible entry left: `ArchiveError::NothingToExtract`.
//! 3. One visible entry: that entry, under its own name.
//! 4. Several: the whole extraction directory, under the container's stem.
//!
//! For disk images (`promote_partitions`), hidden and otherwise unwanted
//! members were already skipped while copying:
//! - several partitions: the whole copy root, under the image's stem;
//! - one partition with one member: that member, under its own name;
//! - one partition with several members: the partition's directory, under
//!   the partition name;
//! - one partition without members: `ArchiveError::EmptyPartition`.
//!
use crate::common::fs::io::remove_hidden_entries;
use crate::core::error::{ArchiveError, Result};
use anyhow::anyhow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// The single path chosen to become the result of an extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateResult {
    /// Where the result currently lives (inside a scratch workspace).
    pub path: PathBuf,
    /// Name the result should take in the destination directory.
    pub destination_name: OsString,
}

/// What was copied out of one partition of a disk image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionCopy {
    pub name: OsString,
    /// Names of the members that were copied, in copy order.
    pub members: Vec<OsString>,
}

/// Applies the zip/tar rules to `extract_dir`, the extraction of `container`.
///
/// `container_stem` names the result when several entries remain.
pub fn normalize_extracted(
    extract_dir: &Path,
    container: &Path,
    container_stem: &OsStr,
) -> Result<CandidateResult> {
    let visible = remove_hidden_entries(extract_dir)?;
    match visible.as_slice() {
        [] => Err(anyhow!(ArchiveError::NothingToExtract {
            path: container.to_path_buf(),
        })),
        [only] => Ok(CandidateResult {
            path: extract_dir.join(only),
            destination_name: only.clone(),
        }),
        _ => Ok(CandidateResult {
            path: extract_dir.to_path_buf(),
            destination_name: container_stem.to_os_string(),
        }),
    }
}

/// Applies the disk image rules to the partitions copied below `copy_root`.
pub fn promote_partitions(
    copy_root: &Path,
    partitions: &[PartitionCopy],
    image: &Path,
    image_stem: &OsStr,
) -> Result<CandidateResult> {
    match partitions {
        [] => Err(anyhow!(ArchiveError::NothingToExtract {
            path: image.to_path_buf(),
        })),
        [partition] => {
            let partition_path = copy_root.join(&partition.name);
            match partition.members.as_slice() {
                [] => Err(anyhow!(ArchiveError::EmptyPartition {
                    name: partition.name.to_string_lossy().into_owned(),
                })),
                [member] => Ok(CandidateResult {
                    path: partition_path.join(member),
                    destination_name: member.clone(),
                }),
                _ => Ok(CandidateResult {
                    path: partition_path,
                    destination_name: partition.name.clone(),
                }),
            }
        }
        _ => Ok(CandidateResult {
            path: copy_root.to_path_buf(),
            destination_name: image_stem.to_os_string(),
        }),
    }
}
