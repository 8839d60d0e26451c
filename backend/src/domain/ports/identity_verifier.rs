//! Driven port for third-party identity token verification.
//!
//! The identity provider issues a signed ID token in the browser. Adapters of
//! [`IdentityVerifier`] check its signature, expiry, issuer and audience and
//! hand back the claims the registration flow needs.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Reasons an identity token was not accepted.
    pub enum IdentityVerificationError {
        /// No credential was supplied.
        Missing => "identity credential is missing",
        /// The credential is not a well-formed signed token.
        Malformed { message: String } => "identity credential is malformed: {message}",
        /// The token has expired.
        Expired => "identity credential has expired",
        /// The token was issued for another application.
        Audience => "identity credential was issued for another audience",
        /// Signature, issuer or claims failed verification.
        Rejected { message: String } => "identity credential rejected: {message}",
        /// The provider's signing keys could not be obtained.
        KeysUnavailable { message: String } => "identity provider keys unavailable: {message}",
        /// No application identifier is configured.
        NotConfigured => "identity sign-in is not configured",
    }
}

/// Opaque identity token as posted by the browser.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct IdentityCredential(String);

impl IdentityCredential {
    /// Wrap a raw token, rejecting blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityVerificationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityVerificationError::missing());
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for IdentityCredential {
    type Error = IdentityVerificationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// Tokens are bearer secrets; keep them out of logs.
impl fmt::Debug for IdentityCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityCredential(<redacted>)")
    }
}

/// Claims extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// Display name, when the provider shares one.
    pub name: Option<String>,
    /// Verified email address.
    pub email: String,
}

/// Verifies identity tokens against the provider's published keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify the credential and return its identity claims.
    async fn verify(
        &self,
        credential: &IdentityCredential,
    ) -> Result<VerifiedIdentity, IdentityVerificationError>;
}

/// Verifier used when no application identifier is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredIdentityVerifier;

#[async_trait]
impl IdentityVerifier for UnconfiguredIdentityVerifier {
    async fn verify(
        &self,
        _credential: &IdentityCredential,
    ) -> Result<VerifiedIdentity, IdentityVerificationError> {
        Err(IdentityVerificationError::not_configured())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_credentials_are_missing(#[case] raw: &str) {
        assert_eq!(
            IdentityCredential::new(raw),
            Err(IdentityVerificationError::Missing)
        );
    }

    #[rstest]
    fn debug_output_hides_the_token() {
        let credential = IdentityCredential::new("secret.token.value").expect("credential");
        assert!(!format!("{credential:?}").contains("secret"));
        assert_eq!(credential.as_str(), "secret.token.value");
    }

    #[tokio::test]
    async fn unconfigured_verifier_rejects_everything() {
        let credential = IdentityCredential::new("a.b.c").expect("credential");
        let err = UnconfiguredIdentityVerifier
            .verify(&credential)
            .await
            .expect_err("not configured");
        assert_eq!(err, IdentityVerificationError::NotConfigured);
    }
}
