//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::DestinationCatalogue;
use crate::domain::ports::{
    ChatResponder, ContactCommand, FeedbackCommand, FeedbackQuery, RegistrationCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn RegistrationCommand>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub feedback_query: Arc<dyn FeedbackQuery>,
    pub contact: Arc<dyn ContactCommand>,
    pub chat: Arc<dyn ChatResponder>,
}

/// Values the rendered pages expose to the client script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSettings {
    /// OAuth client id for the Google sign-in button; `None` shows the
    /// fallback button.
    pub google_client_id: Option<String>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationCommand>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub feedback_query: Arc<dyn FeedbackQuery>,
    pub contact: Arc<dyn ContactCommand>,
    pub chat: Arc<dyn ChatResponder>,
    pub destinations: DestinationCatalogue,
    pub site: SiteSettings,
}

impl HttpState {
    /// Construct state from a ports bundle and the site settings.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use tripsync::domain::ports::{
    ///     DisabledMailer, FixtureFeedbackRepository, FixtureUserRepository,
    ///     UnconfiguredIdentityVerifier,
    /// };
    /// use tripsync::domain::{
    ///     CannedChatResponder, ContactService, FeedbackService, MailDispatcher,
    ///     RegistrationService,
    /// };
    /// use tripsync::inbound::http::state::{HttpState, HttpStatePorts, SiteSettings};
    ///
    /// let mail = MailDispatcher::new(Arc::new(DisabledMailer));
    /// let feedback = Arc::new(FeedbackService::new(Arc::new(FixtureFeedbackRepository::default())));
    /// let ports = HttpStatePorts {
    ///     registration: Arc::new(RegistrationService::new(
    ///         Arc::new(FixtureUserRepository::default()),
    ///         Arc::new(UnconfiguredIdentityVerifier),
    ///         mail.clone(),
    ///     )),
    ///     feedback: feedback.clone(),
    ///     feedback_query: feedback,
    ///     contact: Arc::new(ContactService::new(mail)),
    ///     chat: Arc::new(CannedChatResponder::default()),
    /// };
    /// let state = HttpState::new(ports, SiteSettings::default());
    /// assert_eq!(state.destinations.all().len(), 20);
    /// ```
    pub fn new(ports: HttpStatePorts, site: SiteSettings) -> Self {
        let HttpStatePorts {
            registration,
            feedback,
            feedback_query,
            contact,
            chat,
        } = ports;
        Self {
            registration,
            feedback,
            feedback_query,
            contact,
            chat,
            destinations: DestinationCatalogue::default(),
            site,
        }
    }
}
