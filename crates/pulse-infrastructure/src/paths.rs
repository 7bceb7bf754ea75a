//! Unified path management for pulse files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/pulse/             # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/pulse/        # Data directory
//! ├── storage.json             # Key-value store (session slot)
//! └── logs/                    # Application logs
//!     └── pulse.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "pulse";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolved locations for one run of the application.
///
/// `PulsePaths::platform()` follows the platform conventions (XDG on Linux);
/// `PulsePaths::new` pins both roots, which tests and `--data-dir` use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulsePaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PulsePaths {
    pub fn new(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Platform default directories.
    ///
    /// # Returns
    ///
    /// - `Ok(PulsePaths)`: e.g. `~/.config/pulse/` and `~/.local/share/pulse/`
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directories
    pub fn platform() -> Result<Self, PathError> {
        let config_dir = dirs::config_dir().ok_or(PathError::HomeDirNotFound)?;
        let data_dir = dirs::data_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(Self::new(config_dir.join(APP_DIR), data_dir.join(APP_DIR)))
    }

    /// Replaces the data directory, keeping the config directory.
    pub fn with_data_dir(self, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..self
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the main configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to the key-value store file named `file_name`.
    pub fn storage_file(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
