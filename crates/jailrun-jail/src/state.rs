//! State directory resolution.
//!
//! The per-container directory is owned by the caller. This crate only
//! joins fixed artifact names onto it.

use std::path::{Component, Path, PathBuf};

use jailrun_common::config::RuntimeConfig;
use jailrun_common::constants::{CONF_FILE_NAME, FSTAB_FILE_NAME};
use jailrun_common::error::{JailrunError, Result};
use jailrun_common::types::ContainerId;

/// Maps a container id to its state directory.
pub trait StateDirs {
    /// Returns the state directory for `id`.
    fn dir(&self, id: &ContainerId) -> PathBuf;
}

impl<F> StateDirs for F
where
    F: Fn(&ContainerId) -> PathBuf,
{
    fn dir(&self, id: &ContainerId) -> PathBuf {
        self(id)
    }
}

/// Returns the nominal `jail.conf` path for `id`.
pub fn conf_path(state: &impl StateDirs, id: &ContainerId) -> PathBuf {
    state.dir(id).join(CONF_FILE_NAME)
}

/// Returns the nominal `fstab` path for `id`.
pub fn fstab_path(state: &impl StateDirs, id: &ContainerId) -> PathBuf {
    state.dir(id).join(FSTAB_FILE_NAME)
}

/// State directories laid out as `<root>/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsStateDirs {
    root: PathBuf,
}

impl FsStateDirs {
    /// Uses `root` as the parent of every state directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses the state root from a runtime configuration.
    #[must_use]
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.state_root.clone())
    }

    /// Returns the parent of every state directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the state directory for `id` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn allocate(&self, id: &ContainerId) -> Result<PathBuf> {
        let dir = self.dir(id);
        std::fs::create_dir_all(&dir).map_err(|e| JailrunError::Io {
            path: dir.clone(),
            source: e,
        })?;
        tracing::debug!(id = %id, path = %dir.display(), "allocated state directory");
        Ok(dir)
    }
}

impl Default for FsStateDirs {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

impl StateDirs for FsStateDirs {
    /// Only the plain name components of `id` are used, so an absolute id
    /// or one containing `..` still resolves under the root.
    fn dir(&self, id: &ContainerId) -> PathBuf {
        let mut dir = self.root.clone();
        dir.extend(
            Path::new(id.as_str())
                .components()
                .filter(|c| matches!(c, Component::Normal(_))),
        );
        dir
    }
}
