//! Driving port for reading feedback.

use async_trait::async_trait;

use crate::domain::{Error, FeedbackEntry};

/// Lists visitor feedback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackQuery: Send + Sync {
    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<FeedbackEntry>, Error>;
}
