//! # Archive System Tool Wrappers (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module wraps the platform programs the `archive` tool relies on. The
//! tool implements no codecs itself; it only decides *which* program to run
//! with *which* arguments, and what to do with the result.
//!
//! ## Architecture
//!
//! - **`ditto`**: The container tool. Creates and extracts zip containers,
//!   transcodes files with filesystem compression, and copies files while
//!   preserving their attributes.
//! - **`tar`**: Extracts tarballs, optionally through a decompression filter.
//! - **`hdiutil`**: Mounts disk images for the lifetime of a `MountSession`.
//! - **`file_info`**: Queries the alias and invisible flags of a file.
//! - **`trash`**: Moves an original to the trash after a successful commit.
//!
//! Program names come from the `[tools]` table of the configuration and are
//! bundled in a `Toolchain`, which every wrapper takes as its first argument.
//!
use crate::core::config::ToolsConfig;

pub mod ditto;
pub mod file_info;
pub mod hdiutil;
pub mod tar;
pub mod trash;

#[cfg(test)]
pub mod testing;

/// The external programs used for one run of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ditto: String,
    pub tar: String,
    pub hdiutil: String,
    pub get_file_info: String,
    pub trash: String,
}

impl Toolchain {
    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self {
            ditto: tools.ditto.clone(),
            tar: tools.tar.clone(),
            hdiutil: tools.hdiutil.clone(),
            get_file_info: tools.get_file_info.clone(),
            trash: tools.trash.clone(),
        }
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::from_config(&ToolsConfig::default())
    }
}
