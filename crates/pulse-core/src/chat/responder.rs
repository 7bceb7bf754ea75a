//! Keyword-rule reply selection.
//!
//! The assistant has no model behind it: each message is lowercased and
//! checked against an ordered rule list, and the first rule with a matching
//! keyword supplies the reply. Keywords are plain substrings, so "this"
//! matches "hi".

use tracing::debug;

/// Reply used when no rule matches.
pub const FALLBACK_RESPONSE: &str = "I'm not sure I understand. Could you rephrase your question about your analytics, dashboard, or charts?";

/// Produces the assistant's reply to one user message.
pub trait Responder: Send + Sync {
    /// Returns a non-empty reply. Must be deterministic for a given input.
    fn respond(&self, input: &str) -> String;
}

/// One keyword group and its bound reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    /// Lowercase substrings; any one of them selects the rule.
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl KeywordRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Built-in rules, highest priority first.
const DEFAULT_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["hello", "hi"],
        response: "Hello! How can I assist you today with your analytics or dashboard?",
    },
    KeywordRule {
        keywords: &["dashboard"],
        response: "Your dashboard shows key metrics like user growth, revenue, tasks, and completion rates. You can view more details in the Analytics section.",
    },
    KeywordRule {
        keywords: &["chart", "graph"],
        response: "The Analytics section provides various charts including line charts, bar charts, and pie charts. You can switch between them and change the time frame to see different patterns in your data.",
    },
    KeywordRule {
        keywords: &["revenue", "sales"],
        response: "Your current revenue is $42,853, which is up 8.1% compared to the previous period. Keep up the good work!",
    },
    KeywordRule {
        keywords: &["user", "customer"],
        response: "You have 12,592 total users, with a growth rate of 12.3% compared to the last period. Most of your users are active on weekdays.",
    },
    KeywordRule {
        keywords: &["help", "support"],
        response: "I'm here to help! You can ask me about your dashboard metrics, chart data, or how to use this application. What specific information are you looking for?",
    },
    KeywordRule {
        keywords: &["thank"],
        response: "You're welcome! If you have any more questions, feel free to ask.",
    },
];

/// Ordered keyword-rule responder.
///
/// # Example
///
/// ```
/// use pulse_core::chat::{KeywordResponder, Responder, FALLBACK_RESPONSE};
///
/// let responder = KeywordResponder::default();
/// assert_eq!(responder.respond("xyz123"), FALLBACK_RESPONSE);
/// ```
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    rules: Vec<KeywordRule>,
    fallback: &'static str,
}

impl KeywordResponder {
    /// Creates a responder from `rules` in priority order.
    pub fn new(rules: Vec<KeywordRule>, fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec(), FALLBACK_RESPONSE)
    }
}

impl Responder for KeywordResponder {
    fn respond(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        match self.rules.iter().position(|rule| rule.matches(&lowered)) {
            Some(index) => {
                debug!(rule = index, "Matched keyword rule");
                self.rules[index].response.to_string()
            }
            None => self.fallback.to_string(),
        }
    }
}
