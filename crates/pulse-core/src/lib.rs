pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;
pub mod storage;
pub mod user;
pub mod validation;

// Re-export common error type
pub use error::{PulseError, Result};
