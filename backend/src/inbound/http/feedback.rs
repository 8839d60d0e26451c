//! Feedback board handlers.
//!
//! ```text
//! GET /feedback
//! POST /feedback name=Ada&email=ada%40example.com&message=Loved+Goa
//! POST /feedback {"name":"Ada","message":"Loved Goa"}
//! ```

use actix_web::http::header;
use actix_web::{Either, HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::NewFeedback;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, FeedbackPage};

/// Feedback body, accepted as JSON or urlencoded. Every field is optional
/// free text.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl From<FeedbackForm> for NewFeedback {
    fn from(form: FeedbackForm) -> Self {
        Self::from_parts(form.name, form.email, form.message)
    }
}

/// List every entry, newest first.
#[get("/feedback")]
pub async fn list_feedback(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entries = state.feedback_query.list().await?;
    views::ok(&FeedbackPage {
        site: &state.site,
        entries: &entries,
    })
}

/// Append an entry and redirect back to the list.
#[post("/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    payload: Either<web::Json<FeedbackForm>, web::Form<FeedbackForm>>,
) -> ApiResult<HttpResponse> {
    let form = match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let entry = state.feedback.submit(NewFeedback::from(form)).await?;
    info!(feedback_id = entry.id, "feedback stored");
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/feedback"))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::{MockFeedbackCommand, MockFeedbackQuery};
    use crate::inbound::http::state::SiteSettings;
    use crate::inbound::http::test_utils::{fixture_ports, fixture_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use std::sync::Arc;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .service(list_feedback)
            .service(submit_feedback)
    }

    fn post(message: &str) -> actix_http::Request {
        test::TestRequest::post()
            .uri("/feedback")
            .set_form([("name", "Ada"), ("message", message)])
            .to_request()
    }

    #[actix_web::test]
    async fn posted_feedback_is_listed_first() {
        let app = test::init_service(test_app(fixture_state())).await;

        for message in ["First trip", "Second trip"] {
            let res = test::call_service(&app, post(message)).await;
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
            assert_eq!(
                res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
                Some("/feedback")
            );
        }

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/feedback").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = String::from_utf8_lossy(&body);
        let second = html.find("Second trip").expect("second entry listed");
        let first = html.find("First trip").expect("first entry listed");
        assert!(second < first);
    }

    #[actix_web::test]
    async fn json_feedback_is_stored_and_redirects() {
        let app = test::init_service(test_app(fixture_state())).await;

        let req = test::TestRequest::post()
            .uri("/feedback")
            .set_json(serde_json::json!({"name": "Ada", "message": "Loved Goa"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/feedback").to_request()).await;
        let body = test::read_body(res).await;
        assert!(String::from_utf8_lossy(&body).contains("Loved Goa"));
    }

    #[actix_web::test]
    async fn empty_board_renders_placeholder() {
        let app = test::init_service(test_app(fixture_state())).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/feedback").to_request()).await;
        let body = test::read_body(res).await;
        assert!(String::from_utf8_lossy(&body).contains("No feedback yet"));
    }

    #[actix_web::test]
    async fn empty_form_is_stored_as_empty_text() {
        let mut command = MockFeedbackCommand::new();
        command
            .expect_submit()
            .withf(|feedback| *feedback == NewFeedback::default())
            .times(1)
            .returning(|feedback| {
                Ok(crate::domain::FeedbackEntry {
                    id: 1,
                    name: feedback.name,
                    email: feedback.email,
                    message: feedback.message,
                    created_at: chrono::Utc::now(),
                })
            });
        let mut ports = fixture_ports();
        ports.feedback = Arc::new(command);
        let app = test::init_service(test_app(HttpState::new(ports, SiteSettings::default()))).await;

        let req = test::TestRequest::post()
            .uri("/feedback")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload("")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn store_outage_is_reported_as_unavailable() {
        let mut query = MockFeedbackQuery::new();
        query
            .expect_list()
            .times(1)
            .returning(|| Err(Error::service_unavailable("feedback store unavailable")));
        let mut ports = fixture_ports();
        ports.feedback_query = Arc::new(query);
        let app = test::init_service(test_app(HttpState::new(ports, SiteSettings::default()))).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/feedback").to_request()).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
