//! # Archive Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads the configuration of the `archive` tool. The configuration
//! names the external programs the tool shells out to and the defaults applied
//! when extracting.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (or the `ARCHIVE_CONFIG` variable)
//! 2. User-specific `config.toml` in the platform configuration directory
//! 3. Default values defined in the code
//!
//! Tool paths may use `~`, which is expanded after loading. The final
//! configuration is validated before use.
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! [tools]
//! ditto = "ditto"
//! tar = "/usr/bin/tar"
//! hdiutil = "hdiutil"
//! get_file_info = "~/bin/GetFileInfo"
//! trash = "trash"
//!
//! [extract]
//! fs_compression = true
//! ```
//!
use crate::core::error::{ArchiveError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Programs invoked for each external collaborator.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Container tool: zip create/extract, compression transcode, attribute-preserving copy.
    #[serde(default = "default_ditto")]
    pub ditto: String,
    #[serde(default = "default_tar")]
    pub tar: String,
    /// Disk image mount/unmount tool.
    #[serde(default = "default_hdiutil")]
    pub hdiutil: String,
    /// Alias/invisible flag query tool.
    #[serde(default = "default_get_file_info")]
    pub get_file_info: String,
    #[serde(default = "default_trash")]
    pub trash: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ditto: default_ditto(),
            tar: default_tar(),
            hdiutil: default_hdiutil(),
            get_file_info: default_get_file_info(),
            trash: default_trash(),
        }
    }
}

/// Settings for extract mode.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Apply filesystem compression to the extracted result before committing it.
    #[serde(default = "default_fs_compression")]
    pub fs_compression: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            fs_compression: default_fs_compression(),
        }
    }
}

fn default_ditto() -> String {
    "ditto".to_string()
}
fn default_tar() -> String {
    "tar".to_string()
}
fn default_hdiutil() -> String {
    "hdiutil".to_string()
}
fn default_get_file_info() -> String {
    "GetFileInfo".to_string()
}
fn default_trash() -> String {
    "trash".to_string()
}
fn default_fs_compression() -> bool {
    true
}

const USER_CONFIG_FILENAME: &str = "config.toml";

/// Loads the effective configuration.
///
/// When `explicit` is given, only that file is read and it must exist.
/// Otherwise the user configuration file is used if present, falling back to
/// the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => load_user_config()?.unwrap_or_default(),
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("", "", "archive") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join(USER_CONFIG_FILENAME);
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        anyhow!(ArchiveError::Config(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        )))
    })?;
    toml::from_str(&content).map_err(|e| {
        anyhow!(ArchiveError::Config(format!(
            "Failed to parse TOML from file {}: {}",
            path.display(),
            e
        )))
    })
}

fn expand_config_paths(config: &mut Config) {
    let tools = &mut config.tools;
    for program in [
        &mut tools.ditto,
        &mut tools.tar,
        &mut tools.hdiutil,
        &mut tools.get_file_info,
        &mut tools.trash,
    ] {
        *program = shellexpand::tilde(program.as_str()).into_owned();
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let tools = &config.tools;
    let programs = [
        ("ditto", &tools.ditto),
        ("tar", &tools.tar),
        ("hdiutil", &tools.hdiutil),
        ("get_file_info", &tools.get_file_info),
        ("trash", &tools.trash),
    ];
    for (key, program) in programs {
        if program.trim().is_empty() {
            return Err(anyhow!(ArchiveError::Config(format!(
                "tools.{} cannot be empty.",
                key
            ))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [tools]
            tar = "/usr/local/bin/gtar"

            [extract]
            fs_compression = false
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.tools.tar, "/usr/local/bin/gtar");
        assert_eq!(config.tools.ditto, "ditto"); // Default
        assert_eq!(config.tools.get_file_info, "GetFileInfo"); // Default
        assert!(!config.extract.fs_compression);
    }

    #[test]
    fn test_empty_toml_matches_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.extract.fs_compression);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = toml::from_str::<Config>("[tools]\nzip = \"zip\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config::default();
        config.tools.trash = "~/bin/trash".to_string();
        config.tools.tar = "/usr/bin/tar".to_string();

        expand_config_paths(&mut config);

        let home_dir = directories::BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(
            config.tools.trash,
            home_dir.join("bin/trash").to_string_lossy()
        );
        assert_eq!(config.tools.tar, "/usr/bin/tar"); // Absolute path unchanged
    }

    #[test]
    fn test_validate_config_empty_program() {
        let mut config = Config::default();
        config.tools.hdiutil = "  ".to_string();
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("tools.hdiutil cannot be empty"));
    }

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("archive.toml");
        fs::write(&path, "[tools]\ntrash = \"/opt/trash\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.tools.trash, "/opt/trash");
        assert_eq!(config.tools.hdiutil, "hdiutil");
    }

    #[test]
    fn test_load_missing_explicit_config_is_user_error() {
        let temp_dir = tempdir().unwrap();
        let err = load_config(Some(&temp_dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArchiveError>(),
            Some(ArchiveError::Config(_))
        ));
    }
}
