//! Environment-driven configuration.
//!
//! Everything is read through [`mockable::Env`] so parsing can be tested with
//! `MockEnv`. Optional collaborators (database, SMTP relay, Google sign-in)
//! come back as `None` when their variables are unset; the server then falls
//! back to in-memory stores, disabled mail, or an unconfigured identity path.

mod session;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use mockable::Env;
use url::Url;

use crate::outbound::identity::{GOOGLE_CERTS_URL, GoogleIdentityConfig};
use crate::outbound::mail::SmtpConfig;

pub use session::{BuildMode, SessionConfigError, SessionSettings, session_settings_from_env};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PG_PORT: u16 = 5432;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 30;
const IDENTITY_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that abort startup.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A variable required by another one is absent.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but unusable.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Session settings were rejected.
    #[error(transparent)]
    Session(#[from] SessionConfigError),
}

/// Process configuration, minus the session settings which are read
/// separately because they depend on the build mode.
pub struct AppConfig {
    /// Listener address (`BIND_HOST`:`PORT`).
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// PostgreSQL connection URL, if a database is configured.
    pub database_url: Option<String>,
    /// SMTP relay, if mail is enabled.
    pub smtp: Option<SmtpConfig>,
    /// Google sign-in, if a client id is configured.
    pub google: Option<GoogleIdentityConfig>,
}

impl AppConfig {
    /// Read the configuration from `env`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for malformed numbers, addresses or URLs, and
    /// when `SMTP_HOST` is set without `SMTP_USER`.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: bind_addr_from_env(env)?,
            static_dir: non_empty(env, "STATIC_DIR")
                .map_or_else(default_static_dir, PathBuf::from),
            database_url: database_url_from_env(env)?,
            smtp: smtp_from_env(env)?,
            google: google_from_env(env)?,
        })
    }

    /// Google client id exposed to rendered pages.
    pub fn google_client_id(&self) -> Option<String> {
        self.google.as_ref().map(|google| google.client_id.clone())
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Trimmed value of `name`, treating blank as unset.
fn non_empty<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parsed<E: Env, T: std::str::FromStr>(
    env: &E,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match non_empty(env, name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name,
            value,
            expected,
        }),
    }
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, ConfigError> {
    let port = parsed(env, "PORT", DEFAULT_PORT, "a TCP port")?;
    let host = non_empty(env, "BIND_HOST").unwrap_or_else(|| DEFAULT_BIND_HOST.to_owned());
    let ip: IpAddr = host.parse().map_err(|_| ConfigError::InvalidEnv {
        name: "BIND_HOST",
        value: host,
        expected: "an IP address",
    })?;
    Ok(SocketAddr::new(ip, port))
}

/// `DATABASE_URL`, or a URL assembled from the libpq `PG*` variables.
fn database_url_from_env<E: Env>(env: &E) -> Result<Option<String>, ConfigError> {
    if let Some(url) = non_empty(env, "DATABASE_URL") {
        return Ok(Some(url));
    }
    let Some(host) = non_empty(env, "PGHOST") else {
        return Ok(None);
    };
    let port = parsed(env, "PGPORT", DEFAULT_PG_PORT, "a TCP port")?;

    let invalid_host = |value: String| ConfigError::InvalidEnv {
        name: "PGHOST",
        value,
        expected: "a host name",
    };
    let mut url = Url::parse("postgres://localhost").map_err(|_| invalid_host(host.clone()))?;
    url.set_host(Some(&host)).map_err(|_| invalid_host(host.clone()))?;
    url.set_port(Some(port))
        .map_err(|()| invalid_host(host.clone()))?;
    if let Some(user) = non_empty(env, "PGUSER") {
        url.set_username(&user)
            .map_err(|()| invalid_host(host.clone()))?;
        if let Some(password) = env.string("PGPASSWORD").filter(|p| !p.is_empty()) {
            url.set_password(Some(&password))
                .map_err(|()| invalid_host(host.clone()))?;
        }
    }
    if let Some(database) = non_empty(env, "PGDATABASE") {
        url.set_path(&database);
    }
    Ok(Some(url.into()))
}

fn smtp_from_env<E: Env>(env: &E) -> Result<Option<SmtpConfig>, ConfigError> {
    let Some(host) = non_empty(env, "SMTP_HOST") else {
        return Ok(None);
    };
    let username =
        non_empty(env, "SMTP_USER").ok_or(ConfigError::MissingEnv { name: "SMTP_USER" })?;
    let timeout_secs = parsed(
        env,
        "SMTP_TIMEOUT_SECS",
        DEFAULT_SMTP_TIMEOUT_SECS,
        "a number of seconds",
    )?;
    Ok(Some(SmtpConfig {
        host,
        port: parsed(env, "SMTP_PORT", DEFAULT_SMTP_PORT, "a TCP port")?,
        username,
        password: env.string("SMTP_PASS").filter(|p| !p.is_empty()),
        timeout: Duration::from_secs(timeout_secs),
    }))
}

fn google_from_env<E: Env>(env: &E) -> Result<Option<GoogleIdentityConfig>, ConfigError> {
    let Some(client_id) = non_empty(env, "GOOGLE_CLIENT_ID") else {
        return Ok(None);
    };
    let raw = non_empty(env, "GOOGLE_CERTS_URL").unwrap_or_else(|| GOOGLE_CERTS_URL.to_owned());
    let certs_url = Url::parse(&raw).map_err(|_| ConfigError::InvalidEnv {
        name: "GOOGLE_CERTS_URL",
        value: raw,
        expected: "an absolute URL",
    })?;
    Ok(Some(GoogleIdentityConfig {
        client_id,
        certs_url,
        request_timeout: IDENTITY_REQUEST_TIMEOUT,
    }))
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
