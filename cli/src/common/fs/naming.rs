//! # Unused-Name Resolver
//!
//! File: cli/src/common/fs/naming.rs
//! Author: Christi Mahu
//!
//! Given a desired path such as `/dest/report.txt`, finds the first of
//! `report.txt`, `report-2.txt`, `report-3.txt`, ... in the same directory
//! that does not exist yet. The search has no upper bound.
//!
use crate::common::fs::io::entry_exists;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Returns `path` if nothing exists there, otherwise the first free numbered sibling.
///
/// The number goes between the base name and the final extension
/// (`a.tar.gz` becomes `a.tar-2.gz`). Names starting with a dot have no
/// extension (`.config` becomes `.config-2`). A dangling symbolic link counts
/// as an existing entry.
pub fn find_unused_name(path: &Path) -> PathBuf {
    let mut candidate = path.to_path_buf();
    let mut counter: u64 = 1;
    while entry_exists(&candidate) {
        counter += 1;
        candidate = numbered_sibling(path, counter);
    }
    candidate
}

fn numbered_sibling(path: &Path, counter: u64) -> PathBuf {
    let mut name = OsString::new();
    if let Some(stem) = path.file_stem() {
        name.push(stem);
    }
    name.push(format!("-{}", counter));
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    path.with_file_name(name)
}
