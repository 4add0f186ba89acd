//! Unified error types for the jailrun workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum JailrunError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A create-only artifact is already present on disk.
    ///
    /// Signals an id collision or leftover state from a container that was
    /// not cleaned up. Not retriable without external cleanup.
    #[error("jail: {artifact} should not already exist: {path}")]
    AlreadyExists {
        /// Which artifact collided (`fstab` or `jail.conf`).
        artifact: &'static str,
        /// Path that was already occupied.
        path: PathBuf,
    },

    /// Rendering an artifact template failed.
    #[error("failed to render {artifact}: {message}")]
    Render {
        /// Artifact being rendered.
        artifact: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl JailrunError {
    /// Returns `true` if this error reports an occupied artifact path.
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, JailrunError>;
