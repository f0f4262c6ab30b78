//! # Archive Operations Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module holds the decision logic of the tool: which program handles a
//! given container, what an extracted container turns into at the
//! destination, and in which order staging, committing, and trashing happen.
//!
//! ## Architecture
//!
//! - **`format`**: Maps a container's file name to an `Extractor` variant
//!   (`Zip`, `Tar`, `DiskImage`).
//! - **`normalize`**: Strips hidden entries from extracted content and picks
//!   the single `CandidateResult` that is committed, together with its name.
//! - **`create`**: Packs a file or directory into a zip container.
//! - **`extract`**: `Extractor::extract` for zip and tar containers, plus the
//!   shared commit step and the `extract_archive` entry point.
//! - **`disk_image`**: Copies the visible members of every partition of a
//!   mounted disk image.
//! - **`compression`**: Filesystem compression, in place or as the last
//!   step of an extraction.
//!
//! Every operation stages its work in a `ScratchWorkspace` inside the
//! destination directory and makes it visible with exactly one rename. The
//! original is moved to the trash only after that rename succeeded.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{create, extract};
//!
//! let zip = create::archive_path(&tools, Path::new("/data/photos"), Path::new("/data"))?;
//! let restored = extract::extract_archive(&tools, &zip, Path::new("/data"), &ExtractOptions::default())?;
//! ```
//!

pub mod compression;
pub mod create;
pub mod disk_image;
pub mod extract;
pub mod format;
pub mod normalize;
