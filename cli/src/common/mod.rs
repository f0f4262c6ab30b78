//! # Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! The shared building blocks behind every mode of the `archive` tool. The
//! command handlers in `commands::` only resolve paths and pick a mode; all
//! filesystem work and every external program call lives here.
//!
//! ## Architecture
//!
//! - **`archive`**: Format dispatch, content normalization, and the create /
//!   extract / compress operations built on top of the modules below.
//! - **`fs`**: Scratch workspaces, unused-name resolution, the single-rename
//!   commit, the structural merge used by in-place compression, and small
//!   directory helpers.
//! - **`process`**: Blocking execution of external commands and the
//!   process-wide interruption flag.
//! - **`system`**: Typed wrappers for each external tool (`ditto`, `tar`,
//!   `hdiutil`, `GetFileInfo`, `trash`) and the configured `Toolchain`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{archive, system::Toolchain};
//! use crate::core::error::Result;
//! use std::path::Path;
//!
//! # fn run_example(tools: &Toolchain) -> Result<()> {
//! let zip = archive::create::archive_path(tools, Path::new("/data/photos"), Path::new("/data"))?;
//! # Ok(())
//! # }
//! ```
//!

/// Create, extract and compress operations.
pub mod archive;
/// Filesystem primitives used by the archive operations.
pub mod fs;
/// External command execution and interruption tracking.
pub mod process;
/// Wrappers for the external tools.
pub mod system;
