//! Feedback domain service implementing the feedback driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    FeedbackCommand, FeedbackPersistenceError, FeedbackQuery, FeedbackRepository,
};
use crate::domain::{Error, FeedbackEntry, NewFeedback};

/// Appends and lists feedback through a [`FeedbackRepository`].
#[derive(Clone)]
pub struct FeedbackService {
    repository: Arc<dyn FeedbackRepository>,
}

impl FeedbackService {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<dyn FeedbackRepository>) -> Self {
        Self { repository }
    }

    fn map_persistence_error(error: FeedbackPersistenceError) -> Error {
        match error {
            FeedbackPersistenceError::Connection { message } => {
                warn!(%message, "feedback store unavailable");
                Error::service_unavailable("feedback store unavailable")
            }
            FeedbackPersistenceError::Query { message } => {
                Error::internal(format!("feedback store error: {message}"))
            }
        }
    }
}

#[async_trait]
impl FeedbackCommand for FeedbackService {
    async fn submit(&self, feedback: NewFeedback) -> Result<FeedbackEntry, Error> {
        let entry = self
            .repository
            .insert(&feedback)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(feedback_id = entry.id, "feedback recorded");
        Ok(entry)
    }
}

#[async_trait]
impl FeedbackQuery for FeedbackService {
    async fn list(&self) -> Result<Vec<FeedbackEntry>, Error> {
        self.repository
            .list_newest_first()
            .await
            .map_err(Self::map_persistence_error)
    }
}
