//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use tripsync::domain::ports::{
    DisabledMailer, FeedbackRepository, FixtureFeedbackRepository, FixtureUserRepository,
    IdentityVerifier, Mailer, UnconfiguredIdentityVerifier, UserRepository,
};
use tripsync::domain::{
    CannedChatResponder, ContactService, FeedbackService, MailDispatcher, RegistrationService,
};
use tripsync::inbound::http::state::{HttpState, HttpStatePorts};
use tripsync::outbound::persistence::{DbPool, DieselFeedbackRepository, DieselUserRepository};

use super::ServerConfig;

/// Pick the database-backed stores when a pool is available, otherwise
/// in-memory fixtures.
fn build_stores(
    pool: Option<&DbPool>,
) -> (Arc<dyn UserRepository>, Arc<dyn FeedbackRepository>) {
    match pool {
        Some(pool) => (
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselFeedbackRepository::new(pool.clone())),
        ),
        None => {
            info!("no database configured; users and feedback are kept in memory");
            (
                Arc::new(FixtureUserRepository::default()),
                Arc::new(FixtureFeedbackRepository::default()),
            )
        }
    }
}

fn build_ports(
    config: &ServerConfig,
    users: Arc<dyn UserRepository>,
    feedback_store: Arc<dyn FeedbackRepository>,
) -> HttpStatePorts {
    let mailer: Arc<dyn Mailer> = config
        .mailer
        .clone()
        .unwrap_or_else(|| Arc::new(DisabledMailer));
    let identity: Arc<dyn IdentityVerifier> = config
        .identity
        .clone()
        .unwrap_or_else(|| Arc::new(UnconfiguredIdentityVerifier));
    let mail = MailDispatcher::new(mailer);
    let feedback = Arc::new(FeedbackService::new(feedback_store));

    HttpStatePorts {
        registration: Arc::new(RegistrationService::new(users, identity, mail.clone())),
        feedback: feedback.clone(),
        feedback_query: feedback,
        contact: Arc::new(ContactService::new(mail)),
        chat: Arc::new(CannedChatResponder::default()),
    }
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (users, feedback) = build_stores(config.db_pool.as_ref());
    web::Data::new(HttpState::new(
        build_ports(config, users, feedback),
        config.site.clone(),
    ))
}
