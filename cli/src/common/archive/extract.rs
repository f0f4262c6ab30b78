//! # Archive Extractor
//!
//! File: cli/src/common/archive/extract.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns a container back into its content. Every extraction follows the
//! same shape:
//!
//! 1. Open a `ScratchWorkspace` inside the destination directory.
//! 2. Unpack the container into it (`ditto -x -k`, `tar -x`, or by mounting
//!    a disk image and copying its partitions, see `disk_image`).
//! 3. Pick the `CandidateResult` (see `normalize`).
//! 4. Commit the candidate: either as a filesystem-compressed copy, or with
//!    a plain rename when compression is turned off.
//! 5. Drop the workspace, then move the container to the trash.
//!
//! A failure in any step leaves the destination untouched and the container
//! where it was.
//!
use crate::common::archive::compression::compress_into;
use crate::common::archive::disk_image;
use crate::common::archive::format::{self, Extractor};
use crate::common::archive::normalize::{normalize_extracted, CandidateResult};
use crate::common::fs::commit::move_to_destination;
use crate::common::fs::workspace::ScratchWorkspace;
use crate::common::system::{ditto, tar, trash, Toolchain};
use crate::core::error::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;

const EXTRACTED_DIR: &str = "extracted";

/// Knobs that change how an extraction ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Commit a filesystem-compressed copy of the result instead of the result itself.
    pub fs_compression: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fs_compression: true,
        }
    }
}

impl Extractor {
    /// Extracts `archive` into `destination_dir` and returns the committed path.
    ///
    /// `stem` names the result when the container held several items. The
    /// container itself is left in place.
    pub fn extract(
        self,
        tools: &Toolchain,
        archive: &Path,
        destination_dir: &Path,
        stem: &OsStr,
        options: &ExtractOptions,
    ) -> Result<PathBuf> {
        let workspace = ScratchWorkspace::create_in(destination_dir)?;
        let candidate = match self {
            Extractor::Zip => {
                let extracted = workspace.create_dir(EXTRACTED_DIR)?;
                ditto::extract_zip(tools, archive, &extracted)?;
                normalize_extracted(&extracted, archive, stem)?
            }
            Extractor::Tar { filter } => {
                let extracted = workspace.create_dir(EXTRACTED_DIR)?;
                tar::extract(tools, archive, &extracted, filter)?;
                normalize_extracted(&extracted, archive, stem)?
            }
            Extractor::DiskImage => disk_image::extract_partitions(tools, archive, &workspace, stem)?,
        };
        commit_candidate(tools, &candidate, destination_dir, options)
    }
}

fn commit_candidate(
    tools: &Toolchain,
    candidate: &CandidateResult,
    destination_dir: &Path,
    options: &ExtractOptions,
) -> Result<PathBuf> {
    if options.fs_compression {
        compress_into(
            tools,
            &candidate.path,
            destination_dir,
            &candidate.destination_name,
        )
    } else {
        move_to_destination(&candidate.path, destination_dir, &candidate.destination_name)
    }
}

/// Extracts the container at `archive` into `destination_dir`, then trashes it.
///
/// # Errors
///
/// Returns `ArchiveError::UnknownFileType` before touching anything if the
/// suffix is not recognized, and otherwise propagates the first failing step.
pub fn extract_archive(
    tools: &Toolchain,
    archive: &Path,
    destination_dir: &Path,
    options: &ExtractOptions,
) -> Result<PathBuf> {
    let container = format::detect(archive)?; // Fails before any side effect.
    info!("Extracting file {}...", archive.display());
    let committed = container.extractor.extract(
        tools,
        archive,
        destination_dir,
        &container.stem(archive),
        options,
    )?;
    trash::move_to_trash(tools, archive)?; // The result is already committed.
    Ok(committed)
}
