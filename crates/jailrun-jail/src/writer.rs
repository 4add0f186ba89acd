//! Create-only artifact files with rollback.
//!
//! A [`PendingFile`] is opened with exclusive creation, so a second creator
//! of the same path gets a collision instead of clobbering it. Until
//! [`PendingFile::commit`] succeeds, dropping the guard closes the handle
//! and removes the file, on every exit path.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jailrun_common::constants::{CONF_FILE_NAME, FSTAB_FILE_NAME};
use jailrun_common::error::{JailrunError, Result};

/// The two artifacts written into a state directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// The mount table.
    Fstab,
    /// The jail configuration.
    Conf,
}

impl Artifact {
    /// File name of the artifact inside a state directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Fstab => FSTAB_FILE_NAME,
            Self::Conf => CONF_FILE_NAME,
        }
    }
}

/// An exclusively created file that is removed unless committed.
#[derive(Debug)]
pub struct PendingFile {
    artifact: Artifact,
    path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl PendingFile {
    /// Creates `path`, failing if anything already occupies it.
    ///
    /// `mode` is applied on Unix and ignored elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `JailrunError::AlreadyExists` if the path exists, or
    /// `JailrunError::Io` for any other open failure.
    pub fn create(artifact: Artifact, path: &Path, mode: u32) -> Result<Self> {
        let mut options = OpenOptions::new();
        let _ = options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let _ = options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let file = options.open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                JailrunError::AlreadyExists {
                    artifact: artifact.file_name(),
                    path: path.to_path_buf(),
                }
            } else {
                JailrunError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        tracing::debug!(path = %path.display(), "created {}", artifact.file_name());

        Ok(Self {
            artifact,
            path: path.to_path_buf(),
            file: Some(file),
            committed: false,
        })
    }

    /// Writes through the open handle with a caller-supplied writer.
    ///
    /// # Errors
    ///
    /// Returns `JailrunError::Io` if `write` fails. The file is left in
    /// place until the guard is dropped.
    pub fn write_with<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        let Some(file) = self.file.as_mut() else {
            return Err(JailrunError::Io {
                path: self.path.clone(),
                source: io::Error::other("file handle already closed"),
            });
        };
        write(file).map_err(|e| JailrunError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Writes `contents` in full.
    ///
    /// # Errors
    ///
    /// Returns `JailrunError::Io` if the write fails.
    pub fn write_all(&mut self, contents: &[u8]) -> Result<()> {
        self.write_with(|file| file.write_all(contents))
    }

    /// Syncs and closes the file, keeping it on disk.
    ///
    /// Returns the canonical absolute path of the file.
    ///
    /// # Errors
    ///
    /// Returns `JailrunError::Io` if syncing or resolving the path fails, in
    /// which case the file is removed.
    pub fn commit(mut self) -> Result<PathBuf> {
        if let Some(file) = self.file.take() {
            file.sync_all().map_err(|e| JailrunError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        }
        let resolved = std::fs::canonicalize(&self.path).map_err(|e| JailrunError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        self.committed = true;
        tracing::info!(path = %resolved.display(), "wrote {}", self.artifact.file_name());
        Ok(resolved)
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        drop(self.file.take());
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove partial {}",
                self.artifact.file_name()
            );
        } else {
            tracing::debug!(path = %self.path.display(), "rolled back {}", self.artifact.file_name());
        }
    }
}

/// Creates `path` exclusively and writes `contents` through `write`.
///
/// Returns the canonical path on success. On any failure after creation
/// the file is removed before the error is returned.
///
/// # Errors
///
/// Returns `JailrunError::AlreadyExists` on collision and
/// `JailrunError::Io` on write failure.
pub fn write_new_with<W>(
    artifact: Artifact,
    path: &Path,
    mode: u32,
    contents: &[u8],
    write: W,
) -> Result<PathBuf>
where
    W: FnOnce(&mut File, &[u8]) -> io::Result<()>,
{
    let mut pending = PendingFile::create(artifact, path, mode)?;
    pending.write_with(|file| write(file, contents))?;
    pending.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_new(artifact: Artifact, path: &Path, mode: u32, contents: &[u8]) -> Result<PathBuf> {
        write_new_with(artifact, path, mode, contents, |file, bytes| {
            file.write_all(bytes)
        })
    }

    #[test]
    fn writes_contents_and_returns_canonical_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fstab");

        let written = write_new(Artifact::Fstab, &path, 0o644, b"a b c d 1 1\n").expect("write");

        assert_eq!(written, std::fs::canonicalize(&path).expect("canonicalize"));
        assert!(written.is_absolute());
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "a b c d 1 1\n");
    }

    #[test]
    fn existing_file_is_a_collision_and_left_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("jail.conf");
        std::fs::write(&path, "foreign").expect("seed");

        let err = write_new(Artifact::Conf, &path, 0o644, b"new").unwrap_err();

        assert!(matches!(
            err,
            JailrunError::AlreadyExists { artifact: "jail.conf", path: ref p } if *p == path
        ));
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "foreign");
    }

    #[test]
    fn write_failure_removes_partial_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fstab");

        let err = write_new_with(Artifact::Fstab, &path, 0o644, b"data", |file, bytes| {
            file.write_all(&bytes[..2])?;
            Err(io::Error::other("disk full"))
        })
        .unwrap_err();

        assert!(matches!(err, JailrunError::Io { .. }));
        assert!(err.to_string().contains("disk full"));
        assert!(!path.exists());
    }

    #[test]
    fn dropping_uncommitted_guard_removes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("jail.conf");
        {
            let mut pending = PendingFile::create(Artifact::Conf, &path, 0o644).expect("create");
            pending.write_all(b"partial").expect("write");
            assert!(pending.path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn missing_parent_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent").join("fstab");
        let err = PendingFile::create(Artifact::Fstab, &path, 0o644).unwrap_err();
        assert!(matches!(err, JailrunError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn created_file_uses_requested_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fstab");
        let _ = write_new(Artifact::Fstab, &path, 0o600, b"").expect("write");
        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
