//! Scripted chat widget replies.
//!
//! The widget on every page posts free text and appends whatever comes back.
//! [`CannedChatResponder`] answers from a fixed keyword table and the
//! destination catalogue; it keeps no conversation state.

use crate::domain::DestinationCatalogue;
use crate::domain::ports::ChatResponder;

/// Reasons a chat message is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatValidationError {
    /// Nothing but whitespace was sent.
    #[error("message must not be empty")]
    EmptyMessage,
}

/// One visitor chat message, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage(String);

impl ChatMessage {
    /// Validate and construct a [`ChatMessage`].
    pub fn new(text: impl AsRef<str>) -> Result<Self, ChatValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ChatValidationError::EmptyMessage);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Message text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn words(&self) -> Vec<String> {
        self.0
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

const GREETING_REPLY: &str =
    "Hello! I can tell you about our destinations, registration, contact or feedback.";
const REGISTER_REPLY: &str = "Use the Register button at the top of the page, or sign in with \
     Google. We'll send you a welcome email once you're in.";
const CONTACT_REPLY: &str =
    "You can reach us through the Contact page. We usually reply within a day.";
const FEEDBACK_REPLY: &str =
    "We'd love to hear from you! Leave a note on the Feedback page and it will show up there.";
const FALLBACK_REPLY: &str = "Sorry, I didn't catch that. Try asking about a destination such as \
     Goa or Jaipur, or about registration, contact or feedback.";

const GREETINGS: &[&str] = &["hi", "hello", "hey", "namaste"];
const REGISTER_WORDS: &[&str] = &["register", "registration", "signup", "sign-up", "join", "account"];
const CONTACT_WORDS: &[&str] = &["contact", "email", "phone", "call", "reach"];
const FEEDBACK_WORDS: &[&str] = &["feedback", "review", "reviews", "suggestion"];
const DESTINATION_WORDS: &[&str] = &[
    "destination",
    "destinations",
    "location",
    "locations",
    "places",
    "travel",
    "trip",
];

/// Keyword-matching responder backed by the destination catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedChatResponder {
    catalogue: DestinationCatalogue,
}

impl CannedChatResponder {
    /// Create a responder over `catalogue`.
    pub fn new(catalogue: DestinationCatalogue) -> Self {
        Self { catalogue }
    }

    fn destination_reply(&self, words: &[String]) -> Option<String> {
        self.catalogue
            .all()
            .iter()
            .find(|destination| {
                destination
                    .name
                    .split_whitespace()
                    .next()
                    .is_some_and(|key| words.iter().any(|word| word.eq_ignore_ascii_case(key)))
            })
            .map(|destination| format!("{}: {}", destination.name, destination.details))
    }

    fn overview_reply(&self) -> String {
        let names: Vec<&str> = self
            .catalogue
            .all()
            .iter()
            .take(5)
            .map(|destination| destination.name)
            .collect();
        format!(
            "We cover {} destinations, including {}. Browse them all on the Locations page.",
            self.catalogue.all().len(),
            names.join(", ")
        )
    }
}

fn mentions(words: &[String], keywords: &[&str]) -> bool {
    words.iter().any(|word| keywords.contains(&word.as_str()))
}

impl ChatResponder for CannedChatResponder {
    fn reply(&self, message: &ChatMessage) -> String {
        let words = message.words();
        if let Some(reply) = self.destination_reply(&words) {
            return reply;
        }
        if mentions(&words, REGISTER_WORDS) {
            return REGISTER_REPLY.to_owned();
        }
        if mentions(&words, CONTACT_WORDS) {
            return CONTACT_REPLY.to_owned();
        }
        if mentions(&words, FEEDBACK_WORDS) {
            return FEEDBACK_REPLY.to_owned();
        }
        if mentions(&words, DESTINATION_WORDS) {
            return self.overview_reply();
        }
        if mentions(&words, GREETINGS) {
            return GREETING_REPLY.to_owned();
        }
        FALLBACK_REPLY.to_owned()
    }
}
