//! Port for the chat widget's reply source.

use crate::domain::ChatMessage;

/// Produces a reply for one chat message.
#[cfg_attr(test, mockall::automock)]
pub trait ChatResponder: Send + Sync {
    /// Reply text for the given message.
    fn reply(&self, message: &ChatMessage) -> String;
}
