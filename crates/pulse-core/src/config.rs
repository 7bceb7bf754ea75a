//! Application configuration model.
//!
//! Every section falls back to its defaults, so a partial (or empty)
//! `config.toml` is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Tracing filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub auth: AuthSettings,
    pub chat: ChatSettings,
    pub storage: StorageSettings,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            auth: AuthSettings::default(),
            chat: ChatSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

/// Settings for the mocked authentication authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Simulated round-trip time for login and register.
    pub latency_ms: u64,
}

impl AuthSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self { latency_ms: 1000 }
    }
}

/// Settings for the assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Delay before the assistant's reply is shown.
    pub reply_delay_ms: u64,
    /// Longest accepted user message, in characters. Longer input is cut.
    pub max_input_chars: usize,
}

impl ChatSettings {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Settings with no reply delay, for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            reply_delay_ms: 0,
            ..Self::default()
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            max_input_chars: 200,
        }
    }
}

/// Settings for the on-disk key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// File name inside the data directory.
    pub file_name: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            file_name: "storage.json".to_string(),
        }
    }
}
