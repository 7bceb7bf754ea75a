//! Error types for the Pulse application.

use thiserror::Error;

/// A shared error type for the entire Pulse application.
///
/// Authentication failures are kept as dedicated variants so the presentation
/// layer can map them to a single generic message without string matching.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PulseError {
    /// Login was attempted with an empty email or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration was attempted with an empty name, email or password.
    #[error("Invalid registration data")]
    InvalidRegistrationData,

    /// Reading from the key-value store failed
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Writing to (or removing from) the key-value store failed
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PulseError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a StorageRead error
    pub fn storage_read(message: impl Into<String>) -> Self {
        Self::StorageRead(message.into())
    }

    /// Creates a StorageWrite error
    pub fn storage_write(message: impl Into<String>) -> Self {
        Self::StorageWrite(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from the authentication mock rejecting input.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InvalidRegistrationData)
    }

    /// Check if this is a storage read or write error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageRead(_) | Self::StorageWrite(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PulseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PulseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PulseError>`.
pub type Result<T> = std::result::Result<T, PulseError>;
