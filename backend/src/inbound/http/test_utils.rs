//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{
    DisabledMailer, FixtureFeedbackRepository, FixtureUserRepository, IdentityVerifier,
    UnconfiguredIdentityVerifier,
};
use crate::domain::{
    CannedChatResponder, ContactService, FeedbackService, MailDispatcher, RegistrationService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts, SiteSettings};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports backed by in-memory fixtures, with mail disabled and no identity
/// provider configured.
pub fn fixture_ports() -> HttpStatePorts {
    fixture_ports_with_verifier(Arc::new(UnconfiguredIdentityVerifier))
}

/// Like [`fixture_ports`], with a caller-supplied identity verifier.
pub fn fixture_ports_with_verifier(verifier: Arc<dyn IdentityVerifier>) -> HttpStatePorts {
    let mail = MailDispatcher::new(Arc::new(DisabledMailer));
    let feedback = Arc::new(FeedbackService::new(Arc::new(
        FixtureFeedbackRepository::default(),
    )));
    HttpStatePorts {
        registration: Arc::new(RegistrationService::new(
            Arc::new(FixtureUserRepository::default()),
            verifier,
            mail.clone(),
        )),
        feedback: feedback.clone(),
        feedback_query: feedback,
        contact: Arc::new(ContactService::new(mail)),
        chat: Arc::new(CannedChatResponder::default()),
    }
}

/// State over [`fixture_ports`] with no Google client id.
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports(), SiteSettings::default())
}
