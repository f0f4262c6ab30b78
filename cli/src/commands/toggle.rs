//! # Archive Toggle Handler
//!
//! File: cli/src/commands/toggle.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements the whole command line of `archive`. By default every source is
//! packed into `<name>.zip`; with `-e` every source is treated as a container
//! and extracted; with `--fs-compress` every source is compressed in place.
//! Sources are processed one after another, and the first failure stops the
//! run.
//!
//! ## Workflow
//!
//! 1. Load the configuration (`core::config`) and build the `Toolchain`.
//! 2. Validate the explicit destination directory, if one was given. It must
//!    already exist; it is never created.
//! 3. For each source: resolve it to an absolute path, pick its destination
//!    (the explicit one, or the directory containing the source), and run the
//!    selected mode.
//!
//! ## Usage
//!
//! ```bash
//! # Pack two folders into photos.zip and music.zip next to them
//! archive photos music
//!
//! # Extract into another directory, without filesystem compression
//! archive -e -d ~/Downloads --no-fs-compression backup.tar.gz
//!
//! # Compress an application bundle in place
//! archive --fs-compress /Applications/Big.app
//! ```
//!
use crate::common::archive::compression::compress_in_place;
use crate::common::archive::create::archive_path;
use crate::common::archive::extract::{extract_archive, ExtractOptions};
use crate::common::fs::io::entry_exists;
use crate::common::system::Toolchain;
use crate::core::config::load_config;
use crate::core::error::{ArchiveError, Result};
use anyhow::{anyhow, Context};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Arguments shared by all three modes.
#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Extract the given containers instead of archiving
    #[arg(short, long, conflicts_with = "fs_compress")]
    extract: bool,

    /// Apply filesystem compression to the given paths in place
    #[arg(long)]
    fs_compress: bool,

    /// Directory to place results in (defaults to each source's own directory)
    #[arg(short, long, value_name = "DIR")]
    destination_dir: Option<PathBuf>,

    /// Configuration file to use instead of the user configuration
    #[arg(long, value_name = "FILE", env = "ARCHIVE_CONFIG")]
    config: Option<PathBuf>,

    /// Commit extraction results without applying filesystem compression
    #[arg(long)]
    no_fs_compression: bool,

    /// Files or directories to process, in order
    #[arg(required = true, value_name = "SOURCE")]
    source_paths: Vec<PathBuf>,
}

/// What to do with every source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Archive,
    Extract,
    Compress,
}

impl ToggleArgs {
    pub fn mode(&self) -> Mode {
        if self.extract {
            Mode::Extract
        } else if self.fs_compress {
            Mode::Compress
        } else {
            Mode::Archive
        }
    }
}

/// Runs the selected mode over every source path.
///
/// # Errors
///
/// Returns the first error encountered. Sources after the failing one are not
/// touched; sources before it stay processed.
pub fn handle_toggle(args: ToggleArgs) -> Result<()> {
    let mode = args.mode();
    debug!("Running in {:?} mode", mode);

    // --- Configuration ---
    let config = load_config(args.config.as_deref())?;
    let tools = Toolchain::from_config(&config.tools);
    // The flag can only turn compression off, never on.
    let options = ExtractOptions {
        fs_compression: config.extract.fs_compression && !args.no_fs_compression,
    };

    // --- Destination ---
    // Validated once, before any source is touched.
    let explicit_destination = match (&args.destination_dir, mode) {
        (Some(dir), Mode::Compress) => {
            warn!(
                "Ignoring destination directory {} while compressing in place",
                dir.display()
            );
            None
        }
        (Some(dir), _) => Some(resolve_destination(dir)?),
        (None, _) => None,
    };

    // --- Sources, strictly one after another ---
    for source_path in &args.source_paths {
        let source = resolve_source(source_path)?;
        // Without `-d`, each source lands next to itself.
        let destination = match &explicit_destination {
            Some(dir) => dir.clone(),
            None => source
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| anyhow!("Cannot process {:?}: it has no parent directory", source))?,
        };

        match mode {
            Mode::Archive => {
                archive_path(&tools, &source, &destination)?;
            }
            Mode::Extract => {
                extract_archive(&tools, &source, &destination, &options)?;
            }
            Mode::Compress => compress_in_place(&tools, &source)?, // Always in place.
        }
    }

    info!("Done.");
    Ok(())
}

/// Makes `path` absolute with a canonical parent, keeping the last component as given.
///
/// A symbolic link given as a source is processed as the link itself.
fn resolve_source(path: &Path) -> Result<PathBuf> {
    if !entry_exists(path) {
        return Err(anyhow!(ArchiveError::SourceNotFound {
            path: path.to_path_buf(),
        }));
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            // A bare file name has an empty parent: the working directory.
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            let parent = parent
                .canonicalize()
                .with_context(|| format!("Failed to resolve {:?}", parent))?;
            Ok(parent.join(name))
        }
        _ => path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {:?}", path)),
    }
}

fn resolve_destination(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(resolved) if resolved.is_dir() => Ok(resolved),
        _ => Err(anyhow!(ArchiveError::InvalidDestination {
            path: path.to_path_buf(),
        })),
    }
}
