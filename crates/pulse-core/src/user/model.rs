//! User domain model.
//!
//! Represents the identity record held by the session while signed in.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identifier assigned by the mocked authority to every account.
pub const DEFAULT_USER_ID: &str = "1";
/// Display name the mocked authority returns on login.
pub const DEFAULT_USER_NAME: &str = "John Doe";

/// Signed-in identity.
///
/// Stored verbatim in the durable slot as a JSON object with exactly the
/// fields `id`, `name` and `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Login identifier
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Encodes the record for the key-value store.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a record previously written by [`User::to_json`].
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
