//! Conversation transcript.

use std::sync::Arc;
use std::time::Duration;

use super::message::ChatMessage;
use super::responder::Responder;
use crate::config::ChatSettings;

/// First message of every conversation.
pub const WELCOME_MESSAGE: &str = "Hello! I'm your analytics assistant. How can I help you today?";

/// The assistant's reply to a submitted message, not yet delivered.
///
/// Dropping it discards the reply.
pub struct PendingReply {
    responder: Arc<dyn Responder>,
    prompt: String,
    delay: Duration,
}

impl PendingReply {
    /// The user text this reply answers.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Waits out the reply delay and builds the assistant's message.
    pub async fn resolve(self) -> ChatMessage {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        ChatMessage::bot(self.responder.respond(&self.prompt))
    }
}

/// Ordered chat history between the user and the assistant.
pub struct Conversation {
    responder: Arc<dyn Responder>,
    settings: ChatSettings,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Starts a conversation seeded with [`WELCOME_MESSAGE`].
    pub fn new(responder: Arc<dyn Responder>, settings: ChatSettings) -> Self {
        Self {
            responder,
            settings,
            messages: vec![ChatMessage::bot(WELCOME_MESSAGE)],
        }
    }

    /// Records a user message and returns the reply to deliver later.
    ///
    /// Blank input is ignored and yields `None`. Input longer than
    /// `max_input_chars` is cut to that many characters.
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }

        let prompt: String = text.chars().take(self.settings.max_input_chars).collect();
        self.messages.push(ChatMessage::user(prompt.clone()));

        Some(PendingReply {
            responder: Arc::clone(&self.responder),
            prompt,
            delay: self.settings.reply_delay(),
        })
    }

    /// Appends a delivered message.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Submits `text`, waits for the reply and appends it.
    ///
    /// Returns the assistant's message, or `None` for blank input.
    pub async fn exchange(&mut self, text: &str) -> Option<ChatMessage> {
        let pending = self.submit(text)?;
        let reply = pending.resolve().await;
        self.push(reply.clone());
        Some(reply)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Sender;
    use crate::chat::responder::{FALLBACK_RESPONSE, KeywordResponder};

    fn conversation(settings: ChatSettings) -> Conversation {
        Conversation::new(Arc::new(KeywordResponder::default()), settings)
    }

    #[test]
    fn test_starts_with_welcome() {
        let conv = conversation(ChatSettings::instant());
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].sender, Sender::Bot);
        assert_eq!(conv.messages()[0].text, WELCOME_MESSAGE);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut conv = conversation(ChatSettings::instant());
        assert!(conv.submit("").is_none());
        assert!(conv.submit("   \n").is_none());
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn test_long_input_is_cut() {
        let settings = ChatSettings {
            max_input_chars: 5,
            ..ChatSettings::instant()
        };
        let mut conv = conversation(settings);
        let pending = conv.submit("héllo world").unwrap();
        assert_eq!(pending.prompt(), "héllo");
        assert_eq!(conv.last().unwrap().text, "héllo");
    }

    #[tokio::test]
    async fn test_exchange_appends_user_then_bot() {
        let mut conv = conversation(ChatSettings::instant());
        let reply = conv.exchange("xyz123").await.unwrap();

        assert_eq!(reply.text, FALLBACK_RESPONSE);
        assert_eq!(conv.len(), 3);
        assert_eq!(conv.messages()[1].sender, Sender::User);
        assert_eq!(conv.messages()[1].text, "xyz123");
        assert_eq!(conv.messages()[2].sender, Sender::Bot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let mut conv = conversation(ChatSettings::default());
        let pending = conv.submit("thanks").unwrap();

        let started = tokio::time::Instant::now();
        let reply = pending.resolve().await;
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(reply.text.starts_with("You're welcome"));
    }

    #[test]
    fn test_dropped_reply_is_never_recorded() {
        let mut conv = conversation(ChatSettings::instant());
        drop(conv.submit("hello"));
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.last().unwrap().sender, Sender::User);
    }
}
