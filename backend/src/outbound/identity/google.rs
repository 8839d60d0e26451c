//! Google ID token verification against Google's published JWK set.
//!
//! Tokens are RS256 JWTs issued by `accounts.google.com` for the configured
//! OAuth client id. The key set is fetched over HTTPS and cached; an unknown
//! `kid` triggers a refetch, rate limited so random key ids cannot turn every
//! request into an outbound call.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::domain::ports::{
    IdentityCredential, IdentityVerificationError, IdentityVerifier, VerifiedIdentity,
};

/// Google's JWK endpoint for ID token signing keys.
pub const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];
const KEY_SET_TTL: Duration = Duration::from_secs(60 * 60);
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);
const CLOCK_LEEWAY_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
}

/// Settings for [`GoogleIdentityVerifier`].
#[derive(Debug, Clone)]
pub struct GoogleIdentityConfig {
    /// OAuth client id; tokens must name it as their audience.
    pub client_id: String,
    /// JWK set endpoint.
    pub certs_url: Url,
    /// Timeout for fetching the key set.
    pub request_timeout: Duration,
}

struct CachedKeys {
    keys: Arc<JwkSet>,
    fetched_at: Instant,
}

/// Verifies Google ID tokens.
pub struct GoogleIdentityVerifier {
    client: reqwest::Client,
    client_id: String,
    certs_url: Url,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleIdentityVerifier {
    /// Build a verifier with its own HTTP client.
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be constructed (TLS backend setup).
    pub fn new(config: GoogleIdentityConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            client_id: config.client_id,
            certs_url: config.certs_url,
            cache: RwLock::new(None),
        })
    }

    fn cached_keys(&self, kid: &str) -> Option<Arc<JwkSet>> {
        let guard = self.cache.read().unwrap_or_else(|err| err.into_inner());
        let cached = guard.as_ref()?;
        let fresh = cached.fetched_at.elapsed() < KEY_SET_TTL;
        let knows_kid = cached.keys.find(kid).is_some();
        let recently_fetched = cached.fetched_at.elapsed() < MIN_REFRESH_INTERVAL;
        (fresh && (knows_kid || recently_fetched)).then(|| Arc::clone(&cached.keys))
    }

    async fn fetch_keys(&self) -> Result<Arc<JwkSet>, IdentityVerificationError> {
        let unavailable =
            |err: reqwest::Error| IdentityVerificationError::keys_unavailable(err.to_string());
        let keys: JwkSet = self
            .client
            .get(self.certs_url.clone())
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;
        info!(keys = keys.keys.len(), "fetched identity provider signing keys");

        let keys = Arc::new(keys);
        let mut guard = self.cache.write().unwrap_or_else(|err| err.into_inner());
        *guard = Some(CachedKeys {
            keys: Arc::clone(&keys),
            fetched_at: Instant::now(),
        });
        Ok(keys)
    }

    async fn keys_for(&self, kid: &str) -> Result<Arc<JwkSet>, IdentityVerificationError> {
        match self.cached_keys(kid) {
            Some(keys) => Ok(keys),
            None => self.fetch_keys().await,
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(
        &self,
        credential: &IdentityCredential,
    ) -> Result<VerifiedIdentity, IdentityVerificationError> {
        let kid = key_id(credential.as_str())?;
        let keys = self.keys_for(&kid).await?;
        verify_with_key_set(credential.as_str(), &keys, &self.client_id)
    }
}

fn key_id(token: &str) -> Result<String, IdentityVerificationError> {
    let header =
        decode_header(token).map_err(|err| IdentityVerificationError::malformed(err.to_string()))?;
    header
        .kid
        .ok_or_else(|| IdentityVerificationError::malformed("token header has no key id"))
}

fn map_jwt_error(error: &jsonwebtoken::errors::Error) -> IdentityVerificationError {
    match error.kind() {
        ErrorKind::ExpiredSignature => IdentityVerificationError::expired(),
        ErrorKind::InvalidAudience => IdentityVerificationError::audience(),
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => IdentityVerificationError::malformed(error.to_string()),
        _ => IdentityVerificationError::rejected(error.to_string()),
    }
}

/// Verify `token` against an already fetched key set.
///
/// Checks the RS256 signature with the key named by the token's `kid`, the
/// Google issuer, expiry (with a small leeway) and that the audience is
/// `client_id`. The token must carry an email that Google has not marked as
/// unverified.
///
/// # Errors
/// Returns the [`IdentityVerificationError`] describing the first failed check.
pub fn verify_with_key_set(
    token: &str,
    keys: &JwkSet,
    client_id: &str,
) -> Result<VerifiedIdentity, IdentityVerificationError> {
    let kid = key_id(token)?;
    let jwk = keys
        .find(&kid)
        .ok_or_else(|| IdentityVerificationError::rejected("unknown signing key"))?;
    let key = DecodingKey::from_jwk(jwk)
        .map_err(|err| IdentityVerificationError::rejected(format!("unusable signing key: {err}")))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.leeway = CLOCK_LEEWAY_SECS;
    validation.set_audience(&[client_id]);
    validation.set_issuer(&GOOGLE_ISSUERS);

    let claims = decode::<GoogleClaims>(token, &key, &validation)
        .map_err(|err| {
            debug!(error = %err, "identity token failed validation");
            map_jwt_error(&err)
        })?
        .claims;

    if claims.email_verified == Some(false) {
        return Err(IdentityVerificationError::rejected("email address is not verified"));
    }
    let email = claims
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| IdentityVerificationError::rejected("token carries no email address"))?;

    Ok(VerifiedIdentity {
        name: claims.name,
        email,
    })
}

#[cfg(test)]
#[path = "google_tests.rs"]
mod tests;
