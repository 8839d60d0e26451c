//! Contact form submission.
//!
//! ```text
//! POST /contact name=Ada&email=ada%40example.com&message=Hello
//! POST /contact {"name":"Ada","message":"Hello"}
//! ```

use actix_web::{Either, HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::{CONTACT_STATUS, ContactMessage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, ContactPage};

/// Contact form body, accepted as JSON or urlencoded. Every field is
/// optional free text.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl From<ContactForm> for ContactMessage {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
            message: form.message.unwrap_or_default(),
        }
    }
}

/// Forward the message to the operator and re-render the form.
///
/// The status line is the same whether or not the relay accepted the mail.
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: Either<web::Json<ContactForm>, web::Form<ContactForm>>,
) -> ApiResult<HttpResponse> {
    let form = match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let message = ContactMessage::from(form);
    state.contact.notify(&message).await;
    views::ok(&ContactPage {
        site: &state.site,
        status: Some(CONTACT_STATUS),
    })
}
