//! Read-only page handlers.
//!
//! ```text
//! GET /
//! GET /locations
//! GET /location/{id}
//! GET /about
//! GET /contact
//! GET /register
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{
    self, AboutPage, ContactPage, HomePage, LocationPage, LocationsPage, NotFoundPage,
    RegisterPage,
};

const FEATURED_COUNT: usize = 6;

/// Leading slice of the catalogue shown on the home page.
fn featured<T>(destinations: &[T]) -> &[T] {
    destinations.get(..FEATURED_COUNT).unwrap_or(destinations)
}

#[get("/")]
pub async fn home(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    views::ok(&HomePage {
        site: &state.site,
        featured: featured(state.destinations.all()),
    })
}

#[get("/locations")]
pub async fn locations(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    views::ok(&LocationsPage {
        site: &state.site,
        destinations: state.destinations.all(),
    })
}

/// One destination. Unknown or non-numeric ids render the 404 page.
#[get("/location/{id}")]
pub async fn location(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let found = path
        .parse::<u32>()
        .ok()
        .and_then(|id| state.destinations.find(id));
    match found {
        Some(destination) => views::ok(&LocationPage {
            site: &state.site,
            destination,
        }),
        None => not_found_page(&state, "Location"),
    }
}

fn not_found_page(state: &HttpState, what: &str) -> ApiResult<HttpResponse> {
    views::render(
        StatusCode::NOT_FOUND,
        &NotFoundPage {
            site: &state.site,
            what,
        },
    )
}

/// Fallback for unrouted paths.
pub async fn page_not_found(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    not_found_page(&state, "Page")
}

#[get("/about")]
pub async fn about(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    views::ok(&AboutPage { site: &state.site })
}

#[get("/contact")]
pub async fn contact_form(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    views::ok(&ContactPage {
        site: &state.site,
        status: None,
    })
}

#[get("/register")]
pub async fn register_form(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    views::ok(&RegisterPage { site: &state.site })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::fixture_state;
    use actix_web::App;
    use rstest::rstest;

    async fn get(uri: &str) -> (StatusCode, String) {
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .service(home)
                .service(locations)
                .service(location)
                .service(about)
                .service(contact_form)
                .service(register_form)
                .default_service(web::to(page_not_found)),
        )
        .await;
        let res = actix_web::test::call_service(&app, actix_web::test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let body = actix_web::test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[rstest]
    #[case("/")]
    #[case("/locations")]
    #[case("/about")]
    #[case("/contact")]
    #[case("/register")]
    #[actix_web::test]
    async fn static_pages_render(#[case] uri: &str) {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("TripSync"));
    }

    #[actix_web::test]
    async fn locations_lists_every_destination() {
        let (_, body) = get("/locations").await;
        assert_eq!(body.matches(r#"class="card""#).count(), 20);
        assert!(body.contains("Jaipur"));
    }

    #[actix_web::test]
    async fn home_features_a_subset() {
        let (_, body) = get("/").await;
        assert_eq!(body.matches(r#"class="card""#).count(), FEATURED_COUNT);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(FEATURED_COUNT - 1, FEATURED_COUNT - 1)]
    #[case(FEATURED_COUNT, FEATURED_COUNT)]
    #[case(FEATURED_COUNT + 4, FEATURED_COUNT)]
    fn short_catalogues_are_featured_whole(#[case] available: usize, #[case] shown: usize) {
        let ids: Vec<usize> = (0..available).collect();
        let picked = featured(&ids);
        assert_eq!(picked.len(), shown);
        assert_eq!(Some(picked), ids.get(..shown));
    }

    #[actix_web::test]
    async fn known_location_is_stable_across_calls() {
        let (first_status, first) = get("/location/2").await;
        let (_, second) = get("/location/2").await;
        assert_eq!(first_status, StatusCode::OK);
        assert!(first.contains("<h1>Jaipur</h1>"));
        assert_eq!(first, second);
    }

    #[rstest]
    #[case("/location/0")]
    #[case("/location/21")]
    #[case("/location/goa")]
    #[actix_web::test]
    async fn unknown_location_is_not_found(#[case] uri: &str) {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Location not found"));
    }

    #[actix_web::test]
    async fn unrouted_paths_render_the_not_found_page() {
        let (status, body) = get("/destinations/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
    }
}
