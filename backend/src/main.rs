//! TripSync entry-point: reads configuration, builds adapters and serves HTTP.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tripsync::config::{AppConfig, BuildMode, session_settings_from_env};
use tripsync::inbound::http::health::HealthState;
use tripsync::inbound::http::state::SiteSettings;
use tripsync::outbound::identity::GoogleIdentityVerifier;
use tripsync::outbound::mail::SmtpMailer;
use tripsync::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let app_config = AppConfig::from_env(&env).map_err(io::Error::other)?;
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    let mut config = ServerConfig::new(
        session,
        app_config.bind_addr,
        app_config.static_dir.clone(),
    )
    .with_site(SiteSettings {
        google_client_id: app_config.google_client_id(),
    });

    match app_config.database_url.clone() {
        Some(database_url) => {
            run_pending_migrations(database_url.clone())
                .await
                .map_err(io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("DATABASE_URL and PGHOST unset; registrations will not survive a restart"),
    }

    match app_config.smtp {
        Some(smtp) => {
            let mailer = SmtpMailer::new(smtp).map_err(io::Error::other)?;
            if let Err(err) = mailer.verify_relay().await {
                warn!(error = %err, "mail relay check failed");
            }
            config = config.with_mailer(Arc::new(mailer));
        }
        None => warn!("SMTP_HOST unset; outgoing mail is disabled"),
    }

    match app_config.google {
        Some(google) => {
            let verifier = GoogleIdentityVerifier::new(google).map_err(io::Error::other)?;
            config = config.with_identity(Arc::new(verifier));
        }
        None => info!("GOOGLE_CLIENT_ID unset; Google sign-in is disabled"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %app_config.bind_addr, "starting server");
    create_server(health_state, config)?.await
}
