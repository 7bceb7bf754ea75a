//! Session domain module.
//!
//! This module contains the sign-in lifecycle and the authentication seam
//! it depends on.
//!
//! # Module Structure
//!
//! - `auth`: Authentication authority trait (`AuthProvider`) and the mock
//! - `manager`: Session lifecycle management (`SessionManager`)
//!
//! # Usage
//!
//! ```ignore
//! use pulse_core::session::{AuthProvider, MockAuthProvider, SessionManager};
//! ```

mod auth;
mod manager;

// Re-export public API
pub use auth::{AuthProvider, MockAuthProvider};
pub use manager::{AuthState, SessionManager};
