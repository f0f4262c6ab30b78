//! # Archive CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. The platform
//! tools (`ditto`, `hdiutil`, `GetFileInfo`, `trash`) are replaced by small
//! POSIX shell stand-ins written into a temporary directory and wired up
//! through a configuration file passed with `--config`. `tar` stays the real
//! system tool.
//!
//! The stand-ins follow the command lines the tool sends:
//! - `ditto -c` / `ditto -x` pack and unpack with `tar`, so a container made
//!   by the stand-in can be extracted again by it.
//! - `hdiutil mount` treats the image as a directory whose subdirectories
//!   are the partitions, and copies them below the mount root.
//! - `GetFileInfo` reports names containing `alias` as aliases and names
//!   containing `invisible` as invisible.
//! - `trash` moves its argument into `<fake dir>/Trash`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates an `assert_cmd::Command` for the compiled `archive` binary.
pub fn archive_cmd() -> Command {
    let mut cmd = Command::cargo_bin("archive").expect("Failed to find archive binary for testing");
    cmd.env_remove("RUST_LOG")
        .env_remove("ARCHIVE_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

// Shared with the unit-test stand-ins in `src/common/system/testing.rs`.
const DITTO: &str = include_str!("fixtures/ditto.sh");
const HDIUTIL: &str = include_str!("fixtures/hdiutil.sh");
const GET_FILE_INFO: &str = include_str!("fixtures/get_file_info.sh");
const TRASH: &str = include_str!("fixtures/trash.sh");

const DETACH: &str = r#"rm -rf "$2""#;

const FAILING: &str = "#!/bin/sh\nexit 1\n";

/// Stand-ins for the platform tools plus a configuration file pointing at them.
pub struct FakeTools {
    dir: TempDir,
    fs_compression: bool,
}

impl FakeTools {
    pub fn new() -> Self {
        let fake = Self {
            dir: tempfile::tempdir().expect("Failed to create fake tool directory"),
            fs_compression: true,
        };
        let dir = fake.dir.path().to_string_lossy().into_owned();
        fake.write_script("ditto", DITTO);
        fake.write_script(
            "hdiutil",
            &HDIUTIL.replace("@DIR@", &dir).replace("@DETACH@", DETACH),
        );
        fake.write_script("GetFileInfo", GET_FILE_INFO);
        fake.write_script("trash", &TRASH.replace("@DIR@", &dir));
        fake.write_config();
        fake
    }

    /// Replaces `tool` with a program that always exits with status 1.
    pub fn with_failing(self, tool: &str) -> Self {
        self.write_script(tool, FAILING);
        self
    }

    /// Sets `extract.fs_compression` in the generated configuration.
    pub fn with_fs_compression(mut self, enabled: bool) -> Self {
        self.fs_compression = enabled;
        self.write_config();
        self
    }

    /// `archive --config <generated config>`, ready for more arguments.
    pub fn command(&self) -> Command {
        let mut cmd = archive_cmd();
        cmd.arg("--config").arg(self.path("config.toml"));
        cmd
    }

    pub fn trash_dir(&self) -> PathBuf {
        self.path("Trash")
    }

    pub fn mount_log(&self) -> Vec<String> {
        fs::read_to_string(self.path("hdiutil.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_config(&self) {
        let program = |name: &str| self.path(name).to_string_lossy().into_owned();
        let config = format!(
            "[tools]\nditto = {:?}\ntar = \"tar\"\nhdiutil = {:?}\nget_file_info = {:?}\ntrash = {:?}\n\n\
             [extract]\nfs_compression = {}\n",
            program("ditto"),
            program("hdiutil"),
            program("GetFileInfo"),
            program("trash"),
            self.fs_compression,
        );
        fs::write(self.path("config.toml"), config).expect("Failed to write test configuration");
    }

    fn write_script(&self, name: &str, content: &str) {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake tool executable");
    }
}

/// Relative path of every entry below `root`, with file contents.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<String>> {
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.expect("Failed to walk directory");
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let content = entry
                .file_type()
                .is_file()
                .then(|| fs::read_to_string(entry.path()).unwrap());
            (relative, content)
        })
        .collect()
}

/// Sorted names of the direct entries of `dir`.
pub fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Writes a tar container with the given `(path, content)` entries.
pub fn write_tar(path: &Path, entries: &[(&str, &str)], gzip: bool) {
    let file = fs::File::create(path).expect("Failed to create tar fixture");
    if gzip {
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        append_entries(&mut builder, entries);
        builder.into_inner().unwrap().finish().unwrap();
    } else {
        let mut builder = tar::Builder::new(file);
        append_entries(&mut builder, entries);
        builder.into_inner().unwrap();
    }
}

fn append_entries<W: std::io::Write>(builder: &mut tar::Builder<W>, entries: &[(&str, &str)]) {
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .expect("Failed to append tar entry");
    }
}

/// Builds an image the fake `hdiutil` can mount: one subdirectory per partition.
pub fn build_image(path: &Path, partitions: &[(&str, &[&str])]) {
    fs::create_dir(path).expect("Failed to create image fixture");
    for (partition, members) in partitions {
        let root = path.join(partition);
        fs::create_dir(&root).unwrap();
        for member in *members {
            fs::write(root.join(member), *member).unwrap();
        }
    }
}
