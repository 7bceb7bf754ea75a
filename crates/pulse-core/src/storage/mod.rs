//! Durable key-value storage.
//!
//! # Module Structure
//!
//! - `repository`: the `KeyValueStore` trait and well-known keys
//! - `memory`: in-process implementation used by tests and ephemeral runs

mod memory;
mod repository;

pub use memory::MemoryKeyValueStore;
pub use repository::{KeyValueStore, USER_STORAGE_KEY};
