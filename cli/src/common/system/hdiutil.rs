//! # Disk Image Mount Session (`hdiutil`)
//!
//! File: cli/src/common/system/hdiutil.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `MountSession` attaches a disk image read-only below a private mount
//! root and guarantees that every volume still mounted there is detached
//! again, whichever way the session ends.
//!
//! ## Architecture
//!
//! - `MountSession::open` runs
//!   `hdiutil mount -readonly -nobrowse -mountroot ROOT IMAGE`, answering `Y`
//!   to any license agreement the image presents. On success `ROOT` holds one
//!   directory per volume.
//! - `MountSession::close` detaches every entry still present under `ROOT`
//!   with `hdiutil detach`. Detaching one volume can take sibling volumes of
//!   the same image with it, so each entry is checked again right before its
//!   detach. A failing detach does not stop the others; the first failure is
//!   reported once all were attempted.
//! - Dropping a session that was not closed (an early return with `?`, or a
//!   panic) performs the same detach loop and logs failures instead of
//!   returning them.
//!
//! ## Usage
//!
//! ```rust
//! let session = MountSession::open(&tools, image_path, &mount_root)?;
//! let copied = copy_volumes(&session);
//! session.close()?;
//! let copied = copied?;
//! ```
//!
use crate::common::fs::io::{entry_exists, list_entry_names};
use crate::common::process::Invocation;
use crate::common::system::Toolchain;
use crate::core::error::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Answer fed to any interactive license agreement shown while mounting.
const LICENSE_RESPONSE: &str = "Y\n";

/// A disk image mounted below `mount_root`.
#[derive(Debug)]
pub struct MountSession<'a> {
    tools: &'a Toolchain,
    mount_root: PathBuf,
    closed: bool,
}

impl<'a> MountSession<'a> {
    /// Mounts `image` read-only below the existing, empty directory `mount_root`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the mount command fails. Nothing is detached in
    /// that case, because nothing was attached.
    pub fn open(tools: &'a Toolchain, image: &Path, mount_root: &Path) -> Result<Self> {
        info!("Mounting {}...", image.display());
        Invocation::new(&tools.hdiutil)
            .arg("mount")
            .arg("-readonly")
            .arg("-nobrowse")
            .arg("-mountroot")
            .arg(mount_root)
            .arg(image)
            .stdin_text(LICENSE_RESPONSE)
            .run()?;
        Ok(Self {
            tools,
            mount_root: mount_root.to_path_buf(),
            closed: false,
        })
    }

    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }

    /// Names of the mounted volumes, sorted.
    pub fn partitions(&self) -> Result<Vec<OsString>> {
        list_entry_names(&self.mount_root)
    }

    /// Detaches every volume still mounted and ends the session.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.detach_all()
    }

    fn detach_all(&self) -> Result<()> {
        info!("Unmounting image...");
        let mut first_error = None;
        for name in list_entry_names(&self.mount_root)? {
            let mount_path = self.mount_root.join(&name);
            if !entry_exists(&mount_path) {
                debug!("{:?} already unmounted", mount_path);
                continue;
            }
            let detached = Invocation::new(&self.tools.hdiutil)
                .arg("detach")
                .arg(&mount_path)
                .run();
            if let Err(e) = detached {
                warn!("Failed to unmount {}: {:#}", mount_path.display(), e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for MountSession<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.detach_all() {
            warn!("Unmounting after failure did not complete: {:#}", e);
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::common::system::testing::FakeTools;
    use crate::core::error::ArchiveError;
    use std::fs;
    use tempfile::tempdir;

    fn image_with_partitions(dir: &Path, partitions: &[&str]) -> PathBuf {
        let image = dir.join("image.dmg");
        for partition in partitions {
            fs::create_dir_all(image.join(partition)).unwrap();
            fs::write(image.join(partition).join("file"), *partition).unwrap();
        }
        image
    }

    #[test]
    fn test_open_mounts_each_partition() -> Result<()> {
        let fake = FakeTools::new();
        let tools = fake.toolchain();
        let dir = tempdir()?;
        let image = image_with_partitions(dir.path(), &["Data", "System"]);
        let mount_root = dir.path().join("mounts");
        fs::create_dir(&mount_root)?;

        let session = MountSession::open(&tools, &image, &mount_root)?;
        assert_eq!(session.partitions()?, vec!["Data", "System"]);
        assert_eq!(fs::read_to_string(session.mount_root().join("Data/file"))?, "Data");
        session.close()?;

        assert!(list_entry_names(&mount_root)?.is_empty());
        assert_eq!(fake.mount_log(), vec!["mounted 2", "detach Data", "detach System"]);
        Ok(())
    }

    #[test]
    fn test_failing_body_still_unmounts() -> Result<()> {
        let fake = FakeTools::new();
        let tools = fake.toolchain();
        let dir = tempdir()?;
        let image = image_with_partitions(dir.path(), &["Root Partition Name"]);
        let mount_root = dir.path().join("mounts");
        fs::create_dir(&mount_root)?;

        let body = || -> Result<()> {
            let _session = MountSession::open(&tools, &image, &mount_root)?;
            anyhow::bail!("induced failure while copying");
        };
        assert!(body().is_err());

        assert!(list_entry_names(&mount_root)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_sibling_unmounted_by_detach_is_skipped() -> Result<()> {
        // Detaching "A" also removes "B", as a multi-volume image does.
        let fake = FakeTools::new().with_linked_detach();
        let tools = fake.toolchain();
        let dir = tempdir()?;
        let image = image_with_partitions(dir.path(), &["A", "B"]);
        let mount_root = dir.path().join("mounts");
        fs::create_dir(&mount_root)?;

        MountSession::open(&tools, &image, &mount_root)?.close()?;

        assert!(list_entry_names(&mount_root)?.is_empty());
        assert_eq!(fake.mount_log(), vec!["mounted 2", "detach A"]);
        Ok(())
    }

    #[test]
    fn test_failed_detach_still_detaches_siblings() -> Result<()> {
        let fake = FakeTools::new().with_failing_detach("B");
        let tools = fake.toolchain();
        let dir = tempdir()?;
        let image = image_with_partitions(dir.path(), &["A", "B", "C"]);
        let mount_root = dir.path().join("mounts");
        fs::create_dir(&mount_root)?;

        let session = MountSession::open(&tools, &image, &mount_root)?;
        let closed = session.close();

        // The failure is reported only after every partition was tried.
        let err = closed.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArchiveError>(),
            Some(ArchiveError::ExternalCommand { .. })
        ));
        assert_eq!(list_entry_names(&mount_root)?, vec!["B"]);
        assert_eq!(fake.mount_log(), vec!["mounted 3", "detach A", "detach C"]);
        Ok(())
    }

    #[test]
    fn test_failed_mount_is_fatal_and_detaches_nothing() {
        let fake = FakeTools::new();
        let tools = fake.toolchain();
        let dir = tempdir().unwrap();
        let mount_root = dir.path().join("mounts");
        fs::create_dir(&mount_root).unwrap();

        let result = MountSession::open(&tools, &dir.path().join("missing.dmg"), &mount_root);

        assert!(result.is_err());
        assert!(fake.mount_log().iter().all(|line| !line.starts_with("detach")));
    }
}
