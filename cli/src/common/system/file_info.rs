//! # File Metadata Queries (`GetFileInfo`)
//!
//! File: cli/src/common/system/file_info.rs
//! Author: Christi Mahu
//!
//! `GetFileInfo -a<flag> PATH` prints `1` when the Finder attribute is set
//! and `0` otherwise. Disk images use these attributes to hide their
//! background pictures and to ship aliases to `/Applications`.
//!
use crate::common::process::Invocation;
use crate::common::system::Toolchain;
use crate::core::error::{ArchiveError, Result};
use anyhow::anyhow;
use std::path::Path;

/// Whether `path` is a Finder alias.
pub fn is_alias(tools: &Toolchain, path: &Path) -> Result<bool> {
    query_attribute(tools, "-aa", path)
}

/// Whether `path` has the invisible attribute.
pub fn is_invisible(tools: &Toolchain, path: &Path) -> Result<bool> {
    query_attribute(tools, "-av", path)
}

fn query_attribute(tools: &Toolchain, flag: &str, path: &Path) -> Result<bool> {
    let invocation = Invocation::new(&tools.get_file_info).arg(flag).arg(path);
    let output = invocation.output_text()?;
    parse_flag(&output).ok_or_else(|| {
        anyhow!(ArchiveError::UnexpectedToolOutput {
            cmd: invocation.display(),
            output,
        })
    })
}

fn parse_flag(output: &str) -> Option<bool> {
    output.trim().parse::<i64>().ok().map(|value| value == 1)
}
