//! # Format Dispatcher
//!
//! File: cli/src/common/archive/format.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Chooses how a container is extracted from the suffix of its file name.
//! The suffix groups are checked in a fixed priority order and the first
//! match wins:
//!
//! | Suffixes                                    | Extractor                  |
//! |---------------------------------------------|----------------------------|
//! | `.zip` `.jar`                               | `Zip`                      |
//! | `.tar`                                      | `Tar` without filter       |
//! | `.tar.gz` `.tgz`                            | `Tar` with gzip filter     |
//! | `.iso` `.dmg` `.sparseimage` `.sparsebundle`| `DiskImage`                |
//!
//! Detection only looks at the name; nothing on disk is touched.
//!
use crate::common::system::tar::TarFilter;
use crate::core::error::{ArchiveError, Result};
use anyhow::anyhow;
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// How a recognized container is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    Zip,
    Tar { filter: Option<TarFilter> },
    DiskImage,
}

const FORMATS: &[(&[&str], Extractor)] = &[
    (&[".zip", ".jar"], Extractor::Zip),
    (&[".tar"], Extractor::Tar { filter: None }),
    (
        &[".tar.gz", ".tgz"],
        Extractor::Tar {
            filter: Some(TarFilter::Gzip),
        },
    ),
    (
        &[".iso", ".dmg", ".sparseimage", ".sparsebundle"],
        Extractor::DiskImage,
    ),
];

/// A container recognized by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFormat {
    pub extractor: Extractor,
    /// The suffix that matched, e.g. `.tar.gz`.
    pub suffix: &'static str,
}

impl ContainerFormat {
    /// File name of `path` without the matched suffix (`notes.tar.gz` gives `notes`).
    ///
    /// Falls back to the full file name when nothing would remain. Names that
    /// are not valid UTF-8 are kept byte for byte.
    pub fn stem(&self, path: &Path) -> OsString {
        let Some(name) = path.file_name() else {
            return OsString::new();
        };
        match name.as_encoded_bytes().strip_suffix(self.suffix.as_bytes()) {
            Some(stem) if !stem.is_empty() => {
                // SAFETY: every suffix is ASCII, so the cut lands on a boundary
                // `OsStr` allows splitting at.
                unsafe { OsStr::from_encoded_bytes_unchecked(stem) }.to_os_string()
            }
            _ => name.to_os_string(),
        }
    }
}

fn ends_with_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(suffix.as_bytes()))
}

/// Finds the extractor for `path`.
///
/// # Errors
///
/// Returns `ArchiveError::UnknownFileType` if no suffix group matches.
pub fn detect(path: &Path) -> Result<ContainerFormat> {
    FORMATS
        .iter()
        .find_map(|(suffixes, extractor)| {
            suffixes
                .iter()
                .copied()
                .find(|suffix| ends_with_suffix(path, suffix))
                .map(|suffix| ContainerFormat {
                    extractor: *extractor,
                    suffix,
                })
        })
        .ok_or_else(|| {
            anyhow!(ArchiveError::UnknownFileType {
                path: path.to_path_buf(),
            })
        })
}
