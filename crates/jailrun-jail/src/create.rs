//! Jail artifact creation.
//!
//! Resolves the container root, writes the fstab, then writes the
//! `jail.conf` that references it. The fstab must be complete on disk
//! before the config naming it is created.
//!
//! The operation is not idempotent: a second call for the same id fails
//! with a collision and leaves the first call's files untouched. If the
//! config write fails, only the config is rolled back; the finished fstab
//! stays on disk.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jailrun_common::config::RuntimeConfig;
use jailrun_common::constants::ARTIFACT_MODE;
use jailrun_common::error::Result;
use jailrun_common::types::ContainerId;

use crate::conf::render_config;
use crate::fstab::render_fstab;
use crate::path::resolve_root;
use crate::spec::Spec;
use crate::state::{self, StateDirs};
use crate::writer::{Artifact, write_new_with};

/// Writes jail artifacts into state directories resolved by `S`.
#[derive(Debug, Clone)]
pub struct ConfigWriter<S> {
    state: S,
    mode: u32,
}

impl<S: StateDirs> ConfigWriter<S> {
    /// Creates a writer using the default artifact mode.
    #[must_use]
    pub const fn new(state: S) -> Self {
        Self {
            state,
            mode: ARTIFACT_MODE,
        }
    }

    /// Creates a writer honoring the runtime configuration's file mode.
    #[must_use]
    pub const fn with_config(state: S, config: &RuntimeConfig) -> Self {
        Self {
            state,
            mode: config.file_mode,
        }
    }

    /// Returns the state directory resolver.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Creates `fstab` and `jail.conf` for `id` and returns the absolute
    /// path of `jail.conf`.
    ///
    /// # Errors
    ///
    /// - `JailrunError::AlreadyExists` if either artifact already exists.
    /// - `JailrunError::Io` if creating or writing an artifact fails; the
    ///   partially written artifact is removed first.
    /// - `JailrunError::Render` if a template fails to format.
    pub fn create(&self, id: &ContainerId, bundle: &Path, spec: &Spec) -> Result<PathBuf> {
        self.create_with(id, bundle, spec, |_, file, contents| file.write_all(contents))
    }

    pub(crate) fn create_with<W>(
        &self,
        id: &ContainerId,
        bundle: &Path,
        spec: &Spec,
        mut write: W,
    ) -> Result<PathBuf>
    where
        W: FnMut(Artifact, &mut File, &[u8]) -> io::Result<()>,
    {
        let root = resolve_root(bundle, &spec.root.path);
        tracing::debug!(id = %id, root = %root.display(), "resolved container root");

        let fstab = render_fstab(&root, &spec.mounts)?;
        tracing::debug!(id = %id, mounts = spec.mounts.len(), fstab = %fstab, "rendered fstab");

        let fstab_path = write_new_with(
            Artifact::Fstab,
            &state::fstab_path(&self.state, id),
            self.mode,
            fstab.as_bytes(),
            |file, contents| write(Artifact::Fstab, file, contents),
        )?;

        let conf = render_config(id, &root, &fstab_path)?;
        let conf_path = write_new_with(
            Artifact::Conf,
            &state::conf_path(&self.state, id),
            self.mode,
            conf.as_bytes(),
            |file, contents| write(Artifact::Conf, file, contents),
        )?;

        tracing::info!(id = %id, conf = %conf_path.display(), "jail configuration created");
        Ok(conf_path)
    }
}

/// Creates `fstab` and `jail.conf` for `id` in the state directory
/// resolved by `state`, returning the absolute path of `jail.conf`.
///
/// # Errors
///
/// See [`ConfigWriter::create`].
pub fn create_config(
    id: &ContainerId,
    bundle: &Path,
    spec: &Spec,
    state: impl StateDirs,
) -> Result<PathBuf> {
    ConfigWriter::new(state).create(id, bundle, spec)
}
