//! Configuration service implementation.
//!
//! Loads `PulseConfig` from `config.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};

use pulse_core::config::PulseConfig;
use pulse_core::error::Result;
use tracing::debug;

/// Reads the root configuration from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PulseError::Io` if the file exists but cannot be read, and
    /// `PulseError::Serialization` if it is not valid TOML for `PulseConfig`.
    pub async fn load(&self) -> Result<PulseConfig> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "No config file; using defaults");
            return Ok(PulseConfig::default());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let config: PulseConfig = toml::from_str(&content)?;
        debug!(path = %self.path.display(), "Loaded config");
        Ok(config)
    }
}
