//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: the signed-in `User` record and its storage encoding

mod model;

// Re-export public API
pub use model::{DEFAULT_USER_ID, DEFAULT_USER_NAME, User};
