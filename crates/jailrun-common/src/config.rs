//! Global configuration model for the jailrun runtime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JailrunError, Result};

/// Root configuration for the jailrun runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Directory holding one state directory per container id.
    pub state_root: PathBuf,
    /// Permission bits applied to generated artifacts.
    pub file_mode: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            state_root: PathBuf::from(crate::constants::DEFAULT_STATE_ROOT),
            file_mode: crate::constants::ARTIFACT_MODE,
        }
    }
}

impl RuntimeConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// names a relative state root.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| JailrunError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `JailrunError::Config` if the state root is relative or the
    /// file mode has bits outside `0o777`.
    pub fn validate(&self) -> Result<()> {
        if !self.state_root.is_absolute() {
            return Err(JailrunError::Config {
                message: format!(
                    "state root must be absolute: {}",
                    self.state_root.display()
                ),
            });
        }
        if self.file_mode & !0o777 != 0 {
            return Err(JailrunError::Config {
                message: format!("file mode out of range: {:o}", self.file_mode),
            });
        }
        Ok(())
    }
}
