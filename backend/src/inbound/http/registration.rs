//! Registration handlers.
//!
//! ```text
//! POST /register {"name":"Ada","email":"ada@example.com"}
//! POST /register name=Ada&email=ada%40example.com
//! GET /register/success
//! POST /auth/google {"credential":"<Google ID token>"}
//! ```
//!
//! Both registration paths leave the confirmation in the session cookie so the
//! browser can navigate to `/register/success` afterwards.

use actix_web::http::header;
use actix_web::{Either, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::{IdentityCredential, RegistrationConfirmation, RegistrationOutcome};
use crate::domain::{Error, Registrant, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};
use crate::inbound::http::views::{self, SuccessPage};

pub(crate) const SUCCESS_PATH: &str = "/register/success";
const REGISTER_PATH: &str = "/register";

/// Registration form body, accepted as JSON or urlencoded.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl TryFrom<RegisterRequest> for Registrant {
    type Error = UserValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.unwrap_or_default(),
            value.email.unwrap_or_default(),
        )
    }
}

/// Identity-token registration body.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GoogleCredentialRequest {
    /// ID token handed to the page by Google Identity Services.
    pub credential: Option<String>,
}

fn map_registrant_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyName => missing_field_error(FieldName::new("name")),
        UserValidationError::EmptyEmail => missing_field_error(FieldName::new("email")),
    }
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn log_outcome(outcome: &RegistrationOutcome) {
    info!(welcome_mail = ?outcome.welcome_mail, "registration complete");
}

/// Register from the form path.
///
/// JSON callers (the registration modal) receive the confirmation as JSON;
/// plain HTML form posts are redirected to the confirmation page.
#[utoipa::path(
    post,
    path = "/register",
    request_body(
        content = RegisterRequest,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Registered (JSON request)", body = RegistrationConfirmation, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 303, description = "Registered (form request); redirect to /register/success"),
        (status = 400, description = "Missing name or email", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["registration"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Either<web::Json<RegisterRequest>, web::Form<RegisterRequest>>,
) -> ApiResult<HttpResponse> {
    let (request, wants_json) = match payload {
        Either::Left(json) => (json.into_inner(), true),
        Either::Right(form) => (form.into_inner(), false),
    };
    let registrant = Registrant::try_from(request).map_err(map_registrant_error)?;

    let outcome = state.registration.register(&registrant).await?;
    log_outcome(&outcome);
    session.persist_registration(&outcome.confirmation)?;

    if wants_json {
        Ok(HttpResponse::Ok().json(outcome.confirmation))
    } else {
        Ok(see_other(SUCCESS_PATH))
    }
}

/// Confirmation page for the registrant stored in the session.
///
/// Without a registration in the session there is nothing to confirm and the
/// visitor is sent back to the form.
#[get("/register/success")]
pub async fn register_success(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    match session.registration() {
        Some(confirmation) => views::ok(&SuccessPage {
            site: &state.site,
            name: &confirmation.name,
            email: &confirmation.email,
        }),
        None => Ok(see_other(REGISTER_PATH)),
    }
}

/// Register with a Google ID token.
#[utoipa::path(
    post,
    path = "/auth/google",
    request_body = GoogleCredentialRequest,
    responses(
        (status = 200, description = "Registered", body = RegistrationConfirmation, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Token missing or not accepted", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Identity provider or store unavailable", body = Error)
    ),
    tags = ["registration"],
    operation_id = "registerWithGoogle"
)]
#[post("/auth/google")]
pub async fn google_sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GoogleCredentialRequest>,
) -> ApiResult<HttpResponse> {
    let credential = IdentityCredential::new(payload.into_inner().credential.unwrap_or_default())
        .map_err(|_| Error::unauthorized("identity credential is required"))?;

    let outcome = state.registration.register_with_identity(&credential).await?;
    log_outcome(&outcome);
    session.persist_registration(&outcome.confirmation)?;

    Ok(HttpResponse::Ok().json(outcome.confirmation))
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
