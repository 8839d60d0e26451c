//! Chat widget endpoint.
//!
//! ```text
//! POST /chat {"message":"Tell me about Goa"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, empty_message_error, missing_field_error};

/// Message typed into the widget.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ChatRequest {
    #[schema(example = "Tell me about Goa")]
    pub message: Option<String>,
}

/// Text appended to the widget transcript.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ChatReply {
    pub reply: String,
}

/// Answer one chat message.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply", body = ChatReply),
        (status = 400, description = "Missing or blank message", body = Error)
    ),
    tags = ["chat"],
    operation_id = "chat"
)]
#[post("/chat")]
pub async fn chat(
    state: web::Data<HttpState>,
    payload: web::Json<ChatRequest>,
) -> ApiResult<web::Json<ChatReply>> {
    let field = FieldName::new("message");
    let raw = payload
        .into_inner()
        .message
        .ok_or_else(|| missing_field_error(field))?;
    let message = ChatMessage::new(raw).map_err(|_| empty_message_error(field))?;
    Ok(web::Json(ChatReply {
        reply: state.chat.reply(&message),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockChatResponder;
    use crate::inbound::http::state::SiteSettings;
    use crate::inbound::http::test_utils::{fixture_ports, fixture_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn replies_with_responder_text() {
        let mut responder = MockChatResponder::new();
        responder
            .expect_reply()
            .withf(|message| message.as_str() == "Tell me about Goa")
            .times(1)
            .return_const("Goa: beaches".to_owned());
        let mut ports = fixture_ports();
        ports.chat = Arc::new(responder);
        let state = HttpState::new(ports, SiteSettings::default());
        let app =
            test::init_service(App::new().app_data(web::Data::new(state)).service(chat)).await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({"message": "  Tell me about Goa "}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"reply": "Goa: beaches"}));
    }

    #[actix_web::test]
    async fn canned_responder_knows_destinations() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .service(chat),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({"message": "what is there in jaipur?"}))
            .to_request();
        let body: ChatReply = test::call_and_read_body_json(&app, req).await;
        assert!(body.reply.contains("Jaipur"));
    }

    #[rstest]
    #[case(json!({"message": "   "}), "empty_message")]
    #[case(json!({}), "missing_field")]
    #[actix_web::test]
    async fn blank_messages_are_rejected(#[case] payload: Value, #[case] code: &str) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .service(chat),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], code);
    }
}
