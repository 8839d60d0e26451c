//! Driving port for submitting feedback.

use async_trait::async_trait;

use crate::domain::{Error, FeedbackEntry, NewFeedback};

/// Accepts visitor feedback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Append one feedback entry.
    async fn submit(&self, feedback: NewFeedback) -> Result<FeedbackEntry, Error>;
}
