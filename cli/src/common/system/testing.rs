//! Shell stand-ins for the platform tools, used by unit tests.
//!
//! The stand-ins keep the command-line contracts of the real programs while
//! doing the work with `cp`, `tar`, and `mv`:
//! - `ditto` builds tarballs where the real tool builds zip files, and copies
//!   with `cp -R` where it would compress.
//! - `hdiutil` treats an image as a directory whose subdirectories are the
//!   partitions, "mounting" them by copy and logging every call.
//! - `GetFileInfo` reports names containing `alias` as aliases and names
//!   containing `invisible` as invisible.
//! - `trash` moves paths into a `Trash` directory next to the scripts.
#![cfg(unix)]

use super::Toolchain;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

// Shared with the integration tests in `cli/tests/common.rs`.
const DITTO: &str = include_str!("../../../tests/fixtures/ditto.sh");
const HDIUTIL: &str = include_str!("../../../tests/fixtures/hdiutil.sh");
const GET_FILE_INFO: &str = include_str!("../../../tests/fixtures/get_file_info.sh");
const TRASH: &str = include_str!("../../../tests/fixtures/trash.sh");

const DETACH_ONE: &str = r#"rm -rf "$2""#;
const DETACH_ALL: &str = r#"rm -rf "$(dirname "$2")"/*"#;
// `@NAME@` is the partition whose detach fails.
const DETACH_FAILING_FOR: &str = r#"[ "$(basename "$2")" = "@NAME@" ] && exit 1
    rm -rf "$2""#;

const FAILING: &str = "#!/bin/sh\nexit 1\n";

/// A directory of executable stand-ins plus the `Toolchain` pointing at them.
pub struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    pub fn new() -> Self {
        let fake = Self {
            dir: tempfile::tempdir().expect("Failed to create fake tool directory"),
        };
        let dir = fake.dir.path().to_string_lossy().into_owned();
        fake.write_script("ditto", DITTO);
        fake.write_script("GetFileInfo", GET_FILE_INFO);
        fake.write_script("trash", &TRASH.replace("@DIR@", &dir));
        fake.with_detach(DETACH_ONE)
    }

    /// Detaching any volume detaches every volume of the image.
    pub fn with_linked_detach(self) -> Self {
        self.with_detach(DETACH_ALL)
    }

    /// Makes `hdiutil detach` fail for the partition called `partition` only.
    pub fn with_failing_detach(self, partition: &str) -> Self {
        self.with_detach(&DETACH_FAILING_FOR.replace("@NAME@", partition))
    }

    fn with_detach(self, detach: &str) -> Self {
        let dir = self.dir.path().to_string_lossy().into_owned();
        self.write_script(
            "hdiutil",
            &HDIUTIL.replace("@DIR@", &dir).replace("@DETACH@", detach),
        );
        self
    }

    pub fn with_failing(self, tool: &str) -> Self {
        self.write_script(tool, FAILING);
        self
    }

    pub fn toolchain(&self) -> Toolchain {
        let program = |name: &str| self.path(name).to_string_lossy().into_owned();
        Toolchain {
            ditto: program("ditto"),
            tar: "tar".to_string(),
            hdiutil: program("hdiutil"),
            get_file_info: program("GetFileInfo"),
            trash: program("trash"),
        }
    }

    /// Lines logged by the `hdiutil` stand-in.
    pub fn mount_log(&self) -> Vec<String> {
        fs::read_to_string(self.path("hdiutil.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Directory the `trash` stand-in moves paths into.
    pub fn trash_dir(&self) -> PathBuf {
        self.path("Trash")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_script(&self, name: &str, content: &str) {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake tool executable");
    }
}
