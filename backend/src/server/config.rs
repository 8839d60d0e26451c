//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use tripsync::config::SessionSettings;
use tripsync::domain::ports::{IdentityVerifier, Mailer};
use tripsync::inbound::http::state::SiteSettings;
use tripsync::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
///
/// Collaborators left unset fall back to in-memory stores, disabled mail and
/// an unconfigured identity verifier.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) static_dir: PathBuf,
    pub(crate) site: SiteSettings,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) mailer: Option<Arc<dyn Mailer>>,
    pub(crate) identity: Option<Arc<dyn IdentityVerifier>>,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and listener
    /// details.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, static_dir: PathBuf) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            static_dir,
            site: SiteSettings::default(),
            db_pool: None,
            mailer: None,
            identity: None,
        }
    }

    /// Attach a database connection pool for the user and feedback stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Deliver mail through `mailer` instead of skipping every send.
    #[must_use]
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Verify identity tokens with `identity`.
    #[must_use]
    pub fn with_identity(mut self, identity: Arc<dyn IdentityVerifier>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Values exposed to rendered pages.
    #[must_use]
    pub fn with_site(mut self, site: SiteSettings) -> Self {
        self.site = site;
        self
    }
}
