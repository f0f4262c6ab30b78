//! # Structural Merge
//!
//! File: cli/src/common/fs/merge.rs
//! Author: Christi Mahu
//!
//! Moves every file of a transcoded copy over the corresponding file of the
//! tree it was produced from. Both trees come from the same source, so each
//! directory in the copy already exists under the same name in the original:
//! directories are descended pairwise, and only non-directory entries
//! (files and symbolic links) are renamed, one directory level at a time.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::trace;

/// Merges the contents of `copy` into `original`, replacing files of the same name.
///
/// `copy` is left with only empty directories.
pub fn merge_directory_into(copy: &Path, original: &Path) -> Result<()> {
    for entry in fs::read_dir(copy).with_context(|| format!("Failed to read directory {:?}", copy))? {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", copy))?;
        let name = entry.file_name();
        let from = entry.path(); // Entry inside the transcoded copy.
        let to = original.join(&name); // Same position in the original tree.
        // `DirEntry::file_type` does not follow symbolic links.
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to inspect {:?}", from))?;

        if file_type.is_dir() {
            // Directories exist on both sides; descend pairwise.
            merge_directory_into(&from, &to)?;
        } else {
            // Files and links replace their counterpart in one rename.
            trace!("Replacing {:?}", to);
            fs::rename(&from, &to)
                .with_context(|| format!("Failed to move {:?} over {:?}", from, to))?;
        }
    }
    Ok(())
}
