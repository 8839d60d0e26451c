//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::path::PathBuf;

use actix_files::Files;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use tripsync::Trace;
#[cfg(debug_assertions)]
use tripsync::doc::ApiDoc;
use tripsync::inbound::http::chat::chat;
use tripsync::inbound::http::contact::submit_contact;
use tripsync::inbound::http::feedback::{list_feedback, submit_feedback};
use tripsync::inbound::http::health::{HealthState, live, ready};
use tripsync::inbound::http::pages::{
    about, contact_form, home, location, locations, page_not_found, register_form,
};
use tripsync::inbound::http::registration::{google_sign_in, register, register_success};
use tripsync::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    static_dir: PathBuf,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        static_dir,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(home)
        .service(locations)
        .service(location)
        .service(about)
        .service(contact_form)
        .service(submit_contact)
        .service(register_form)
        .service(register)
        .service(register_success)
        .service(google_sign_in)
        .service(list_feedback)
        .service(submit_feedback)
        .service(chat)
        .service(Files::new("/static", static_dir));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(page_not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with session, binding and collaborator settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        static_dir,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            static_dir: static_dir.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn deps() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(test_http_state()),
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    fn test_http_state() -> HttpState {
        let config = ServerConfig::new(
            tripsync::config::SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
            std::net::SocketAddr::from(([127, 0, 0, 1], 0)),
            PathBuf::from("static"),
        );
        build_http_state(&config).get_ref().clone()
    }

    #[rstest]
    #[case("/")]
    #[case("/locations")]
    #[case("/location/1")]
    #[case("/feedback")]
    #[case("/health/ready")]
    #[case("/static/css/style.css")]
    #[actix_web::test]
    async fn routes_are_wired(deps: AppDependencies, #[case] uri: &str) {
        let app = test::init_service(build_app(deps)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        assert!(res.headers().contains_key("trace-id"));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_paths_render_not_found(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn registration_survives_the_redirect(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({"name": "Asha", "email": "asha@example.com"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();
        assert!(cookie.http_only().unwrap_or(false));

        let req = test::TestRequest::get()
            .uri("/register/success")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(!res.headers().contains_key(header::LOCATION));
        let body = test::read_body(res).await;
        assert!(String::from_utf8_lossy(&body).contains("Thanks, Asha!"));
    }
}
