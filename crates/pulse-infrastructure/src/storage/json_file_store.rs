//! JSON-file key-value store.
//!
//! All entries live in a single JSON object, e.g. `~/.local/share/pulse/storage.json`:
//!
//! ```json
//! {
//!   "@user": "{\"id\":\"1\",\"name\":\"John Doe\",\"email\":\"a@b.com\"}"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pulse_core::error::{PulseError, Result};
use pulse_core::storage::KeyValueStore;
use tokio::sync::Mutex;

use super::atomic_json::AtomicJsonFile;

type Entries = BTreeMap<String, String>;

/// [`KeyValueStore`] persisted to one JSON file.
///
/// File I/O runs on the blocking pool. Operations from this process are
/// serialized by an async mutex; other processes are kept out by the file
/// lock taken during writes.
pub struct JsonFileKeyValueStore {
    file: AtomicJsonFile<Entries>,
    io_lock: Mutex<()>,
}

impl JsonFileKeyValueStore {
    /// Opens (lazily) the store at `path`. Nothing is created until the
    /// first write.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            io_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(AtomicJsonFile<Entries>) -> Result<T> + Send + 'static,
    {
        let _io = self.io_lock.lock().await;
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file))
            .await
            .map_err(|e| PulseError::internal(format!("Storage task failed: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.run_blocking(move |file| {
            let entries = file
                .load()
                .map_err(|e| PulseError::storage_read(e.to_string()))?;
            Ok(entries.and_then(|mut map| map.remove(&key)))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.run_blocking(move |file| {
            file.update(Entries::new(), |map| {
                map.insert(key, value);
            })
            .map_err(|e| PulseError::storage_write(e.to_string()))
        })
        .await?;
        tracing::debug!(path = %self.path().display(), "Stored entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.run_blocking(move |file| {
            // Nothing to remove, and no reason to create the file
            if !file.path().exists() {
                return Ok(());
            }
            file.update(Entries::new(), |map| {
                map.remove(&key);
            })
            .map_err(|e| PulseError::storage_write(e.to_string()))
        })
        .await
    }
}
