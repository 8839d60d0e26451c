//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session holds one thing: the confirmation of the most recent
//! registration, read back by `GET /register/success`.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::Error;
use crate::domain::ports::RegistrationConfirmation;

pub(crate) const REGISTRANT_KEY: &str = "registrant";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember who just registered.
    pub fn persist_registration(&self, confirmation: &RegistrationConfirmation) -> Result<(), Error> {
        self.0
            .insert(REGISTRANT_KEY, confirmation)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The last registration made from this browser, if any.
    ///
    /// A cookie that no longer deserialises is treated as absent.
    pub fn registration(&self) -> Option<RegistrationConfirmation> {
        match self.0.get::<RegistrationConfirmation>(REGISTRANT_KEY) {
            Ok(confirmation) => confirmation,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable registrant in session cookie");
                self.0.remove(REGISTRANT_KEY);
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
