//! Container specification model consumed by the renderers.
//!
//! Field names follow the OCI runtime spec so an external loader can
//! deserialize `config.json` straight into these types. Nothing here is
//! validated.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The subset of a container specification this crate reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// Root filesystem of the container.
    pub root: Root,
    /// Mounts in the order they must appear in the fstab.
    #[serde(default)]
    pub mounts: Vec<Mount>,
}

/// Root filesystem location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    /// Absolute path, or a path relative to the bundle directory.
    pub path: PathBuf,
}

/// One mount descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mount {
    /// Device, directory, or pseudo-filesystem name.
    #[serde(default)]
    pub source: String,
    /// Target path relative to the container root.
    pub destination: String,
    /// Filesystem type (`nullfs`, `devfs`, `tmpfs`, ...).
    #[serde(rename = "type", default)]
    pub fs_type: String,
    /// Mount options in the order given.
    #[serde(default)]
    pub options: Vec<String>,
}

impl Mount {
    /// Creates a mount descriptor.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        fs_type: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            fs_type: fs_type.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

impl Spec {
    /// Creates a specification with the given root path and no mounts.
    #[must_use]
    pub fn with_root(path: impl Into<PathBuf>) -> Self {
        Self {
            root: Root { path: path.into() },
            mounts: Vec::new(),
        }
    }

    /// Appends a mount, keeping insertion order.
    #[must_use]
    pub fn mount(mut self, mount: Mount) -> Self {
        self.mounts.push(mount);
        self
    }
}
