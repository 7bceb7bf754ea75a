//! File-backed storage.

mod atomic_json;
mod json_file_store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use json_file_store::JsonFileKeyValueStore;
