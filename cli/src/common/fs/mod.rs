//! # Archive Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module groups the filesystem primitives the archive, extract, and
//! compress modes are built from. None of them call external programs.
//!
//! ## Architecture
//!
//! - **`io`**: Small helpers over `std::fs` that do not follow symbolic links:
//!   existence checks, hidden-name detection, sorted directory listings, and
//!   removal of a file or directory tree.
//! - **`naming`**: The unused-name resolver (`report.txt`, `report-2.txt`, ...).
//! - **`workspace`**: `ScratchWorkspace`, a temporary directory created inside
//!   a given parent and removed on every exit path.
//! - **`commit`**: The safe move that renames a finished result into the
//!   destination directory under an unused name.
//! - **`merge`**: Structural merge of a transcoded copy back over its original.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{commit, workspace::ScratchWorkspace};
//!
//! let workspace = ScratchWorkspace::create_in(destination_dir)?;
//! let staged = workspace.join("archive.zip");
//! // ... produce `staged` ...
//! commit::move_to_destination(&staged, destination_dir, "photos.zip".as_ref())?;
//! ```
//!

/// Renames a finished result into its destination directory.
pub mod commit;
/// Non-following filesystem helpers.
pub mod io;
/// Merges a transcoded directory copy back over its original.
pub mod merge;
/// Finds destination paths that do not collide with existing entries.
pub mod naming;
/// Temporary directories colocated with the destination.
pub mod workspace;
