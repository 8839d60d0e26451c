//! OpenAPI documentation configuration.
//!
//! Only the JSON endpoints are described: the registration modal, Google
//! sign-in, the chat widget and the health probes. Server-rendered pages are
//! left out. The document backs Swagger UI in debug builds and is exported
//! with `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::RegistrationConfirmation;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::chat::{ChatReply, ChatRequest};
use crate::inbound::http::registration::{GoogleCredentialRequest, RegisterRequest};

/// Describe the session cookie set after a successful registration.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted cookie carrying the last registration; read by GET /register/success.",
            ))),
        );
    }
}

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "TripSync backend API",
        description = "Traveller registration, chat and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::registration::register,
        crate::inbound::http::registration::google_sign_in,
        crate::inbound::http::chat::chat,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        GoogleCredentialRequest,
        RegistrationConfirmation,
        ChatRequest,
        ChatReply
    )),
    tags(
        (name = "registration", description = "Traveller sign-up"),
        (name = "chat", description = "Destination assistant"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
