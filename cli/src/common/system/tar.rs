//! # Tar Tool
//!
//! File: cli/src/common/system/tar.rs
//! Author: Christi Mahu
//!
//! Extraction through the system `tar`: `tar -x -C DIRECTORY -f ARCHIVE [FILTER]`.
//!
use crate::common::process::Invocation;
use crate::common::system::Toolchain;
use crate::core::error::Result;
use std::path::Path;

/// Decompression filter applied by `tar` while extracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TarFilter {
    Gzip,
}

impl TarFilter {
    pub fn flag(self) -> &'static str {
        match self {
            TarFilter::Gzip => "-z",
        }
    }
}

/// Extracts `archive` into the existing directory `directory`.
pub fn extract(
    tools: &Toolchain,
    archive: &Path,
    directory: &Path,
    filter: Option<TarFilter>,
) -> Result<()> {
    let mut invocation = Invocation::new(&tools.tar)
        .arg("-x")
        .arg("-C")
        .arg(directory)
        .arg("-f")
        .arg(archive);
    if let Some(filter) = filter {
        invocation = invocation.arg(filter.flag());
    }
    invocation.run()
}
