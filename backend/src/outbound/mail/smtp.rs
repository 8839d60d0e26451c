//! SMTP relay adapter for the `Mailer` port, built on `lettre`.
//!
//! Port 465 uses implicit TLS; every other port upgrades with STARTTLS. The
//! authenticated relay user is both the sender of every message and the
//! operator inbox that receives contact notifications.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::domain::ports::{Mailer, MailerError};
use crate::domain::{MailRecipient, OutboundEmail};

const IMPLICIT_TLS_PORT: u16 = 465;
const SENDER_NAME: &str = "TripSync";

/// Relay connection settings.
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay host name.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Relay user; also the sender and the operator inbox.
    pub username: String,
    /// Relay password, if the relay requires authentication.
    pub password: Option<String>,
    /// Upper bound for one send, connection included.
    pub timeout: Duration,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Sends mail through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    operator: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer. No connection is opened until the first send.
    ///
    /// # Errors
    /// Returns [`MailerError::Address`] when the relay user is not a valid
    /// mailbox and [`MailerError::Transport`] when TLS parameters for the host
    /// cannot be prepared.
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let operator: Mailbox = config
            .username
            .parse()
            .map_err(|err| MailerError::address(format!("relay user: {err}")))?;
        let sender = Mailbox::new(Some(SENDER_NAME.to_owned()), operator.email.clone());

        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|err| MailerError::transport(err.to_string()))?
        .port(config.port)
        .timeout(Some(config.timeout));

        let builder = match config.password {
            Some(password) => builder.credentials(Credentials::new(config.username, password)),
            None => builder,
        };

        Ok(Self {
            transport: builder.build(),
            sender,
            operator,
        })
    }

    /// Open a connection to the relay and close it again.
    ///
    /// # Errors
    /// Returns [`MailerError::Transport`] when the relay cannot be reached or
    /// rejects the handshake.
    pub async fn verify_relay(&self) -> Result<(), MailerError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailerError::transport("relay refused the connection test")),
            Err(err) => Err(MailerError::transport(err.to_string())),
        }
    }

    fn recipient(&self, to: &MailRecipient) -> Result<Mailbox, MailerError> {
        match to {
            MailRecipient::Operator => Ok(self.operator.clone()),
            MailRecipient::Address(address) => address
                .as_ref()
                .parse()
                .map_err(|err| MailerError::address(format!("recipient: {err}"))),
        }
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, MailerError> {
        Message::builder()
            .from(self.sender.clone())
            .to(self.recipient(&email.to)?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|err| MailerError::build(err.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let message = self.build_message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|err| MailerError::transport(err.to_string()))?;
        debug!(code = %response.code(), "relay accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, WELCOME_SUBJECT};
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_owned(),
            port: 587,
            username: "bookings@tripsync.example".to_owned(),
            password: Some("app-password".to_owned()),
            timeout: Duration::from_secs(5),
        }
    }

    fn formatted(message: &Message) -> String {
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    #[rstest]
    #[tokio::test]
    async fn welcome_message_is_addressed_to_the_registrant(config: SmtpConfig) {
        let mailer = SmtpMailer::new(config).expect("mailer builds");
        let email = OutboundEmail {
            to: MailRecipient::Address(EmailAddress::new("ada@example.com").expect("email")),
            subject: WELCOME_SUBJECT.to_owned(),
            html_body: "<h3>Hi Ada,</h3>".to_owned(),
        };

        let text = formatted(&mailer.build_message(&email).expect("message builds"));
        assert!(text.contains("To: ada@example.com"));
        assert!(text.contains("From: TripSync <bookings@tripsync.example>"));
        assert!(text.contains("Subject: Welcome to TripSync!"));
        assert!(text.contains("Content-Type: text/html"));
    }

    #[rstest]
    #[tokio::test]
    async fn operator_notifications_go_to_the_relay_user(config: SmtpConfig) {
        let mailer = SmtpMailer::new(config).expect("mailer builds");
        let email = OutboundEmail {
            to: MailRecipient::Operator,
            subject: "Contact from visitor".to_owned(),
            html_body: "<p>hello</p>".to_owned(),
        };

        let text = formatted(&mailer.build_message(&email).expect("message builds"));
        assert!(text.contains("To: bookings@tripsync.example"));
    }

    #[rstest]
    #[tokio::test]
    async fn unparseable_recipient_is_an_address_error(config: SmtpConfig) {
        let mailer = SmtpMailer::new(config).expect("mailer builds");
        let email = OutboundEmail {
            to: MailRecipient::Address(EmailAddress::new("not an address").expect("non-empty")),
            subject: WELCOME_SUBJECT.to_owned(),
            html_body: String::new(),
        };

        let err = mailer.build_message(&email).expect_err("bad recipient");
        assert!(matches!(err, MailerError::Address { .. }));
    }

    #[rstest]
    fn relay_user_must_be_a_mailbox(mut config: SmtpConfig) {
        config.username = "not a mailbox".to_owned();
        assert!(matches!(
            SmtpMailer::new(config),
            Err(MailerError::Address { .. })
        ));
    }

    #[rstest]
    fn debug_output_hides_the_password(config: SmtpConfig) {
        assert!(!format!("{config:?}").contains("app-password"));
    }
}
