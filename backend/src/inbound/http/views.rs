//! Server-rendered pages.
//!
//! Every page extends `layout.html`, which carries the navigation, the
//! registration button, the chat widget script and, when configured, the
//! `google-client-id` meta tag read by the client script.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use askama::Template;

use crate::domain::{Destination, Error, FeedbackEntry};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::SiteSettings;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub(crate) struct HomePage<'a> {
    pub site: &'a SiteSettings,
    pub featured: &'a [Destination],
}

#[derive(Template)]
#[template(path = "pages/locations.html")]
pub(crate) struct LocationsPage<'a> {
    pub site: &'a SiteSettings,
    pub destinations: &'a [Destination],
}

#[derive(Template)]
#[template(path = "pages/location.html")]
pub(crate) struct LocationPage<'a> {
    pub site: &'a SiteSettings,
    pub destination: &'a Destination,
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
pub(crate) struct NotFoundPage<'a> {
    pub site: &'a SiteSettings,
    pub what: &'a str,
}

#[derive(Template)]
#[template(path = "pages/about.html")]
pub(crate) struct AboutPage<'a> {
    pub site: &'a SiteSettings,
}

#[derive(Template)]
#[template(path = "pages/contact.html")]
pub(crate) struct ContactPage<'a> {
    pub site: &'a SiteSettings,
    pub status: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "pages/register.html")]
pub(crate) struct RegisterPage<'a> {
    pub site: &'a SiteSettings,
}

#[derive(Template)]
#[template(path = "pages/success.html")]
pub(crate) struct SuccessPage<'a> {
    pub site: &'a SiteSettings,
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Template)]
#[template(path = "pages/feedback.html")]
pub(crate) struct FeedbackPage<'a> {
    pub site: &'a SiteSettings,
    pub entries: &'a [FeedbackEntry],
}

/// Render `page` as an HTML response with the given status.
pub(crate) fn render(status: StatusCode, page: &impl Template) -> ApiResult<HttpResponse> {
    let html = page
        .render()
        .map_err(|err| Error::internal(format!("failed to render page: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html))
}

/// Shorthand for a `200 OK` page.
pub(crate) fn ok(page: &impl Template) -> ApiResult<HttpResponse> {
    render(StatusCode::OK, page)
}
