//! Port for append-only feedback storage.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{FeedbackEntry, NewFeedback, sort_newest_first};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feedback repository adapters.
    pub enum FeedbackPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "feedback repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback repository query failed: {message}",
    }
}

/// Storage of feedback entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Append one entry.
    async fn insert(&self, feedback: &NewFeedback) -> Result<FeedbackEntry, FeedbackPersistenceError>;

    /// Every entry, newest first.
    async fn list_newest_first(&self) -> Result<Vec<FeedbackEntry>, FeedbackPersistenceError>;
}

/// In-memory feedback store used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct FixtureFeedbackRepository {
    rows: Mutex<Vec<FeedbackEntry>>,
}

#[async_trait]
impl FeedbackRepository for FixtureFeedbackRepository {
    async fn insert(&self, feedback: &NewFeedback) -> Result<FeedbackEntry, FeedbackPersistenceError> {
        let mut rows = self.rows.lock().unwrap_or_else(|err| err.into_inner());
        let id = i32::try_from(rows.len() + 1)
            .map_err(|_| FeedbackPersistenceError::query("feedback id space exhausted"))?;
        let entry = FeedbackEntry {
            id,
            name: feedback.name.clone(),
            email: feedback.email.clone(),
            message: feedback.message.clone(),
            created_at: Utc::now(),
        };
        rows.push(entry.clone());
        Ok(entry)
    }

    async fn list_newest_first(&self) -> Result<Vec<FeedbackEntry>, FeedbackPersistenceError> {
        let mut entries = self.rows.lock().unwrap_or_else(|err| err.into_inner()).clone();
        sort_newest_first(&mut entries);
        Ok(entries)
    }
}
