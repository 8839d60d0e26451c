//! Driving port for visitor registration.
//!
//! Inbound adapters call [`RegistrationCommand`] for both the form path and
//! the identity-token path. Either way the registrant ends up upserted by
//! email and a welcome mail is attempted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DeliveryStatus, Error, Registrant, User};

use super::IdentityCredential;

/// Name and email echoed back to the registrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationConfirmation {
    /// Stored display name.
    pub name: String,
    /// Stored (normalised) email address.
    pub email: String,
}

impl From<&User> for RegistrationConfirmation {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// What the registrant should be shown.
    pub confirmation: RegistrationConfirmation,
    /// Fate of the welcome mail; informational only.
    pub welcome_mail: DeliveryStatus,
}

/// Registration use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Register from already validated form input.
    ///
    /// # Errors
    /// Store failures surface as `internal_error` or `service_unavailable`.
    /// Mail failures never do.
    async fn register(&self, registrant: &Registrant) -> Result<RegistrationOutcome, Error>;

    /// Register from an identity provider token.
    ///
    /// # Errors
    /// Rejected tokens yield `unauthorized` and leave the store untouched.
    async fn register_with_identity(
        &self,
        credential: &IdentityCredential,
    ) -> Result<RegistrationOutcome, Error>;
}
