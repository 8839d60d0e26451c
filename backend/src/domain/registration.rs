//! Registration domain service.
//!
//! Both registration paths converge on one sequence: upsert the registrant
//! keyed by email, then attempt the welcome mail. The upsert is the only
//! store mutation and happens only after input (or the identity token) has
//! been accepted. Mail failures are logged by the dispatcher and never change
//! the outcome.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    IdentityCredential, IdentityVerificationError, IdentityVerifier, RegistrationCommand,
    RegistrationConfirmation, RegistrationOutcome, UserPersistenceError, UserRepository,
    VerifiedIdentity,
};
use crate::domain::{Error, MailDispatcher, Registrant};

/// Registration service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    verifier: Arc<dyn IdentityVerifier>,
    dispatcher: MailDispatcher,
}

impl RegistrationService {
    /// Create a service from its collaborators.
    pub fn new(
        users: Arc<dyn UserRepository>,
        verifier: Arc<dyn IdentityVerifier>,
        dispatcher: MailDispatcher,
    ) -> Self {
        Self {
            users,
            verifier,
            dispatcher,
        }
    }

    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                warn!(%message, "user store unavailable");
                Error::service_unavailable("user store unavailable")
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user store error: {message}"))
            }
        }
    }

    fn map_identity_error(error: IdentityVerificationError) -> Error {
        match error {
            IdentityVerificationError::KeysUnavailable { .. } => {
                Error::service_unavailable("identity provider unavailable")
            }
            IdentityVerificationError::NotConfigured => {
                Error::service_unavailable("identity sign-in is not configured")
            }
            IdentityVerificationError::Missing
            | IdentityVerificationError::Malformed { .. }
            | IdentityVerificationError::Expired
            | IdentityVerificationError::Audience
            | IdentityVerificationError::Rejected { .. } => {
                Error::unauthorized("identity credential was not accepted")
            }
        }
    }

    /// Turn verified claims into a registrant.
    ///
    /// Providers may omit the display name; the mailbox part of the address
    /// stands in for it.
    fn registrant_from_identity(identity: VerifiedIdentity) -> Result<Registrant, Error> {
        let fallback_name = identity
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_owned();
        let name = identity
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(fallback_name);
        Registrant::try_from_parts(name, identity.email).map_err(|err| {
            warn!(error = %err, "verified identity lacks required claims");
            Error::unauthorized("identity credential was not accepted")
        })
    }

    async fn upsert_and_welcome(
        &self,
        registrant: &Registrant,
    ) -> Result<RegistrationOutcome, Error> {
        let user = self
            .users
            .upsert(registrant)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %user.id(), "registrant stored");

        let welcome_mail = self
            .dispatcher
            .send_welcome(user.email(), user.name())
            .await;

        Ok(RegistrationOutcome {
            confirmation: RegistrationConfirmation::from(&user),
            welcome_mail,
        })
    }
}

#[async_trait]
impl RegistrationCommand for RegistrationService {
    async fn register(&self, registrant: &Registrant) -> Result<RegistrationOutcome, Error> {
        info!(path = "form", "registration attempt");
        self.upsert_and_welcome(registrant).await
    }

    async fn register_with_identity(
        &self,
        credential: &IdentityCredential,
    ) -> Result<RegistrationOutcome, Error> {
        info!(path = "identity", "registration attempt");
        let identity = self.verifier.verify(credential).await.map_err(|err| {
            warn!(error = %err, "identity credential rejected");
            Self::map_identity_error(err)
        })?;
        let registrant = Self::registrant_from_identity(identity)?;
        self.upsert_and_welcome(&registrant).await
    }
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
