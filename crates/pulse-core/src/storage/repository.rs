//! Key-value store trait.

use async_trait::async_trait;

use crate::error::Result;

/// Key of the durable slot that holds the signed-in user.
pub const USER_STORAGE_KEY: &str = "@user";

/// Whole-value string storage keyed by name.
///
/// Implementations replace values atomically; there is no partial update or
/// transaction beyond a single `set`/`remove`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
