//! Mount table rendering.
//!
//! Produces one `fstab(5)` line per mount, in input order, with every
//! target expressed as an absolute path under the container root. No
//! sorting, deduplication, or validation is performed.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use jailrun_common::error::{JailrunError, Result};

use crate::path::join_clean;
use crate::spec::Mount;

/// Dump frequency written for every entry.
pub const DUMP_FREQUENCY: u8 = 1;

/// fsck pass number written for every entry.
pub const PASS_NUMBER: u8 = 1;

/// One rendered fstab line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FstabEntry<'a> {
    /// Device or source path, passed through verbatim.
    pub source: &'a str,
    /// Mount target under the resolved root.
    pub target: PathBuf,
    /// Filesystem type.
    pub fs_type: &'a str,
    /// Comma-joined options; empty when the mount has none.
    pub options: String,
}

impl<'a> FstabEntry<'a> {
    /// Builds the entry for `mount` under the resolved root.
    #[must_use]
    pub fn new(root: &Path, mount: &'a Mount) -> Self {
        Self {
            source: &mount.source,
            target: join_clean(root, Path::new(&mount.destination)),
            fs_type: &mount.fs_type,
            options: mount.options.join(","),
        }
    }
}

impl fmt::Display for FstabEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {DUMP_FREQUENCY} {PASS_NUMBER}",
            self.source,
            self.target.display(),
            self.fs_type,
            self.options,
        )
    }
}

/// Renders the mount table for `mounts` under the resolved `root`.
///
/// Each line ends with a newline; an empty mount list renders as an empty
/// string.
///
/// # Errors
///
/// Returns `JailrunError::Render` if formatting an entry fails.
pub fn render_fstab(root: &Path, mounts: &[Mount]) -> Result<String> {
    let mut out = String::new();
    for mount in mounts {
        writeln!(out, "{}", FstabEntry::new(root, mount)).map_err(|e| JailrunError::Render {
            artifact: jailrun_common::constants::FSTAB_FILE_NAME,
            message: e.to_string(),
        })?;
    }
    Ok(out)
}
