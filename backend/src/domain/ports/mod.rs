//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`Mailer`], [`IdentityVerifier`]) describe
//! what the domain needs from infrastructure. Driving ports (`*Command`,
//! `*Query`, [`ChatResponder`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod chat_responder;
mod contact_command;
mod feedback_command;
mod feedback_query;
mod feedback_repository;
mod identity_verifier;
mod mailer;
mod registration_command;
mod user_repository;

#[cfg(test)]
pub use chat_responder::MockChatResponder;
pub use chat_responder::ChatResponder;
#[cfg(test)]
pub use contact_command::MockContactCommand;
pub use contact_command::ContactCommand;
#[cfg(test)]
pub use feedback_command::MockFeedbackCommand;
pub use feedback_command::FeedbackCommand;
#[cfg(test)]
pub use feedback_query::MockFeedbackQuery;
pub use feedback_query::FeedbackQuery;
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{
    FeedbackPersistenceError, FeedbackRepository, FixtureFeedbackRepository,
};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{
    IdentityCredential, IdentityVerificationError, IdentityVerifier,
    UnconfiguredIdentityVerifier, VerifiedIdentity,
};
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{DisabledMailer, Mailer, MailerError};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{
    RegistrationCommand, RegistrationConfirmation, RegistrationOutcome,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
