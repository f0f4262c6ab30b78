//! # Container Tool (`ditto`)
//!
//! File: cli/src/common/system/ditto.rs
//! Author: Christi Mahu
//!
//! Every operation of the container tool used by `archive`:
//!
//! | Operation              | Command line                                         |
//! |------------------------|------------------------------------------------------|
//! | create zip             | `ditto -c -k [--keepParent] --noqtn SOURCE ARCHIVE`  |
//! | extract zip            | `ditto -x -k ARCHIVE DIRECTORY`                      |
//! | compression transcode  | `ditto --hfsCompression SOURCE DESTINATION`          |
//! | attribute-preserving copy | `ditto SOURCE DESTINATION`                        |
//!
use crate::common::process::Invocation;
use crate::common::system::Toolchain;
use crate::core::error::Result;
use std::path::Path;

/// Packs `source` into the zip container `archive`.
///
/// With `keep_parent`, the container holds `source` itself as its top-level
/// entry instead of only its contents. `--noqtn` keeps quarantine provenance
/// attributes out of the container.
pub fn create_zip(tools: &Toolchain, source: &Path, archive: &Path, keep_parent: bool) -> Result<()> {
    Invocation::new(&tools.ditto)
        .arg("-c")
        .arg("-k")
        .arg_if(keep_parent, "--keepParent")
        .arg("--noqtn")
        .arg(source)
        .arg(archive)
        .run()
}

/// Unpacks the zip container `archive` into the existing directory `directory`.
pub fn extract_zip(tools: &Toolchain, archive: &Path, directory: &Path) -> Result<()> {
    Invocation::new(&tools.ditto)
        .arg("-x")
        .arg("-k")
        .arg(archive)
        .arg(directory)
        .run()
}

/// Copies `source` to the new path `destination`, applying filesystem compression.
pub fn copy_compressed(tools: &Toolchain, source: &Path, destination: &Path) -> Result<()> {
    Invocation::new(&tools.ditto)
        .arg("--hfsCompression")
        .arg(source)
        .arg(destination)
        .run()
}

/// Copies `source` to the new path `destination`, preserving its attributes.
pub fn copy_preserving(tools: &Toolchain, source: &Path, destination: &Path) -> Result<()> {
    Invocation::new(&tools.ditto).arg(source).arg(destination).run()
}
