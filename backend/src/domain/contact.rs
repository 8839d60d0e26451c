//! Contact form submissions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::ContactCommand;
use crate::domain::{DeliveryStatus, MailDispatcher};

/// Status line shown after the contact form is posted, whatever the relay did.
pub const CONTACT_STATUS: &str = "Message sent — we will contact you shortly.";

/// Free-text contact form content. Nothing is validated or stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender name; may be empty.
    pub name: String,
    /// Sender email; may be empty.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// Forwards contact messages through the mail dispatcher.
#[derive(Clone)]
pub struct ContactService {
    dispatcher: MailDispatcher,
}

impl ContactService {
    /// Create a service sending through `dispatcher`.
    pub fn new(dispatcher: MailDispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl ContactCommand for ContactService {
    async fn notify(&self, message: &ContactMessage) -> DeliveryStatus {
        let status = self.dispatcher.send_contact_notification(message).await;
        info!(status = ?status, "contact message processed");
        status
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MailerError, MockMailer};

    #[tokio::test]
    async fn relay_failure_is_reported_not_raised() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailerError::transport("timed out")));
        let service = ContactService::new(MailDispatcher::new(Arc::new(mailer)));

        let status = service.notify(&ContactMessage::default()).await;
        assert_eq!(status, DeliveryStatus::Failed);
    }
}
