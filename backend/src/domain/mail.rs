//! Transactional mail composition and best-effort dispatch.
//!
//! [`MailDispatcher`] renders the welcome and contact-notification bodies and
//! hands them to a [`Mailer`]. A send is awaited once; whatever the relay
//! answers is logged and reported as a [`DeliveryStatus`], never as an error.

use std::sync::Arc;

use askama::Template;
use tracing::{info, warn};

use crate::domain::ports::{Mailer, MailerError};
use crate::domain::{ContactMessage, EmailAddress, UserName};

/// Subject line of the welcome mail.
pub const WELCOME_SUBJECT: &str = "Welcome to TripSync!";

/// Where a message should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailRecipient {
    /// A specific mailbox.
    Address(EmailAddress),
    /// The site operator's inbox, resolved by the mail adapter.
    Operator,
}

/// Fully rendered HTML message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient.
    pub to: MailRecipient,
    /// Subject line (plain text).
    pub subject: String,
    /// Escaped HTML body.
    pub html_body: String,
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The relay accepted the message.
    Sent,
    /// Mail is disabled; nothing was attempted.
    Skipped,
    /// The attempt failed and was logged.
    Failed,
}

#[derive(Template)]
#[template(path = "email/welcome.html")]
struct WelcomeBody<'a> {
    name: &'a str,
}

#[derive(Template)]
#[template(path = "email/contact.html")]
struct ContactBody<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Subject of a contact notification.
///
/// # Examples
/// ```
/// use tripsync::domain::contact_subject;
///
/// assert_eq!(contact_subject("Ada"), "Contact from Ada");
/// assert_eq!(contact_subject("  "), "Contact from visitor");
/// ```
pub fn contact_subject(name: &str) -> String {
    let name = name.trim();
    let sender = if name.is_empty() { "visitor" } else { name };
    format!("Contact from {sender}")
}

/// Composes transactional mail and sends it through a [`Mailer`].
#[derive(Clone)]
pub struct MailDispatcher {
    mailer: Arc<dyn Mailer>,
}

impl MailDispatcher {
    /// Dispatch through the given mailer.
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Send the welcome mail to a new or returning registrant.
    pub async fn send_welcome(&self, to: &EmailAddress, name: &UserName) -> DeliveryStatus {
        let body = WelcomeBody {
            name: name.as_ref(),
        };
        let Some(html_body) = render("welcome", &body) else {
            return DeliveryStatus::Failed;
        };
        let email = OutboundEmail {
            to: MailRecipient::Address(to.clone()),
            subject: WELCOME_SUBJECT.to_owned(),
            html_body,
        };
        self.deliver("welcome", &email).await
    }

    /// Forward a contact form submission to the operator.
    pub async fn send_contact_notification(&self, message: &ContactMessage) -> DeliveryStatus {
        let body = ContactBody {
            name: &message.name,
            email: &message.email,
            message: &message.message,
        };
        let Some(html_body) = render("contact", &body) else {
            return DeliveryStatus::Failed;
        };
        let email = OutboundEmail {
            to: MailRecipient::Operator,
            subject: contact_subject(&message.name),
            html_body,
        };
        self.deliver("contact", &email).await
    }

    async fn deliver(&self, kind: &'static str, email: &OutboundEmail) -> DeliveryStatus {
        match self.mailer.send(email).await {
            Ok(()) => {
                info!(mail = kind, "mail sent");
                DeliveryStatus::Sent
            }
            Err(MailerError::Disabled) => {
                info!(mail = kind, "mail delivery disabled; message skipped");
                DeliveryStatus::Skipped
            }
            Err(err) => {
                warn!(mail = kind, error = %err, "mail delivery failed");
                DeliveryStatus::Failed
            }
        }
    }
}

fn render(kind: &'static str, template: &impl Template) -> Option<String> {
    template
        .render()
        .inspect_err(|err| warn!(mail = kind, error = %err, "failed to render mail body"))
        .ok()
}
