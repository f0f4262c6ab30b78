//! # Trash
//!
//! File: cli/src/common/system/trash.rs
//! Author: Christi Mahu
//!
//! Originals are never deleted outright: once a result has been committed, the
//! source is handed to the trash program so it stays recoverable.
//!
use crate::common::process::Invocation;
use crate::common::system::Toolchain;
use crate::core::error::Result;
use std::path::Path;
use tracing::info;

/// Moves `path` to the trash.
pub fn move_to_trash(tools: &Toolchain, path: &Path) -> Result<()> {
    info!("Moving original file to the trash...");
    Invocation::new(&tools.trash).arg(path).run()
}
