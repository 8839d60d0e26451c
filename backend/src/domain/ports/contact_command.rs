//! Driving port for the contact form.

use async_trait::async_trait;

use crate::domain::{ContactMessage, DeliveryStatus};

/// Forwards contact form submissions to the site operator.
///
/// Delivery is best effort, so the port has no error channel: the outcome is
/// reported for logging and the caller renders the same status either way.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactCommand: Send + Sync {
    /// Notify the operator about one message.
    async fn notify(&self, message: &ContactMessage) -> DeliveryStatus;
}
