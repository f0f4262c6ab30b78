//! # Archive Filesystem I/O Helpers
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` shared by the archive modules. All of them
//! look at directory entries themselves and never follow symbolic links, so a
//! dangling link is an ordinary entry and a link to a directory is never
//! descended into.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use tracing::info;

/// Returns `true` if anything (including a dangling symbolic link) exists at `path`.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Returns `true` if `path` itself is a symbolic link.
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}

/// Returns `true` if `path` is a real directory (not a link to one).
pub fn is_real_dir(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Names starting with a dot are hidden.
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Lists the names of the direct entries of `dir`, sorted.
///
/// # Errors
///
/// Returns an `Err` if the directory cannot be read.
pub fn list_entry_names(dir: &Path) -> Result<Vec<OsString>> {
    let mut names = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {:?}", dir))?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to list entries of {:?}", dir))?;
    names.sort();
    Ok(names)
}

/// Removes `path`: directories recursively, everything else (files, links) with unlink.
pub fn remove_entry(path: &Path) -> Result<()> {
    if is_real_dir(path) {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {:?}", path))
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))
    }
}

/// Deletes every hidden direct entry of `dir` and returns the names of the visible ones.
pub fn remove_hidden_entries(dir: &Path) -> Result<Vec<OsString>> {
    let mut visible = Vec::new();
    for name in list_entry_names(dir)? {
        if is_hidden_name(&name) {
            info!("Removing {}", name.to_string_lossy());
            remove_entry(&dir.join(&name))?;
        } else {
            visible.push(name);
        }
    }
    Ok(visible)
}
