//! Driven port for outbound mail relays.

use async_trait::async_trait;

use crate::domain::OutboundEmail;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail adapters.
    pub enum MailerError {
        /// No relay is configured; the message was not attempted.
        Disabled => "mail delivery is disabled",
        /// Sender or recipient could not be parsed as a mailbox.
        Address { message: String } => "invalid mailbox: {message}",
        /// The message could not be assembled.
        Build { message: String } => "failed to build message: {message}",
        /// The relay refused the message or could not be reached.
        Transport { message: String } => "mail relay failed: {message}",
    }
}

/// Sends one fully rendered message.
///
/// Implementations make a single attempt. Callers decide what a failure
/// means; nothing is queued or retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand the message to the relay and wait for its verdict.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

/// Mailer used when no relay is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), MailerError> {
        Err(MailerError::disabled())
    }
}
