//! Assistant chat module.
//!
//! # Module Structure
//!
//! - `responder`: keyword-rule reply selection (`Responder`, `KeywordResponder`)
//! - `message`: transcript entries (`ChatMessage`, `Sender`)
//! - `conversation`: ordered transcript with delayed replies (`Conversation`)

mod conversation;
mod message;
mod responder;

pub use conversation::{Conversation, PendingReply, WELCOME_MESSAGE};
pub use message::{ChatMessage, Sender};
pub use responder::{FALLBACK_RESPONSE, KeywordResponder, KeywordRule, Responder};
