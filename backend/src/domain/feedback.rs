//! Visitor feedback entries.
//!
//! Feedback is append-only free text: no field is validated, duplicates are
//! allowed and the email is not linked to any registered user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feedback text as submitted by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    /// Free-text name.
    pub name: String,
    /// Free-text email; not validated.
    pub email: String,
    /// Message body.
    pub message: String,
}

impl NewFeedback {
    /// Build a submission, treating absent fields as empty text.
    pub fn from_parts(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            message: message.unwrap_or_default(),
        }
    }
}

/// Stored feedback entry. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Server-assigned identifier; grows with insertion order.
    pub id: i32,
    /// Free-text name.
    pub name: String,
    /// Free-text email.
    pub email: String,
    /// Message body.
    pub message: String,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
}

/// Order entries newest first.
///
/// Identifiers grow with insertion order, so they decide recency on their
/// own; `created_at` follows the wall clock and may step backwards.
pub fn sort_newest_first(entries: &mut [FeedbackEntry]) {
    entries.sort_by(|a, b| b.id.cmp(&a.id));
}
