//! Test helpers for inbound HTTP components.

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::Trace;
use crate::inbound::http::{configure_api, configure_public};
use crate::inbound::http::state::HttpState;
use crate::test_support::MemoryBackend;

pub use crate::test_support::dev_bearer;

/// Instant every handler test starts at.
pub const NOW: &str = "2026-03-04T09:00:00Z";

pub fn now() -> DateTime<Utc> {
    NOW.parse().expect("fixture instant")
}

/// Fresh in-memory backend with the clock at [`NOW`].
pub fn backend() -> MemoryBackend {
    MemoryBackend::starting_at(now())
}

/// Run `request` against the `/api/v1` scope and the public pages backed
/// by `state`.
///
/// The app is rebuilt per call; all stores live behind `Arc`s in `state`,
/// so successive calls observe each other's writes.
pub async fn send(state: &HttpState, request: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api))
            .configure(configure_public),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}

/// Like [`send`] but also decodes the JSON body.
pub async fn send_json(state: &HttpState, request: test::TestRequest) -> (u16, Value) {
    let response = send(state, request).await;
    let status = response.status().as_u16();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

/// Create a habit titled `title` for `owner` and return its id.
pub async fn create_habit(state: &HttpState, owner: &str, title: &str) -> String {
    let (status, body) = send_json(
        state,
        test::TestRequest::post()
            .uri("/api/v1/habits")
            .insert_header(dev_bearer(owner))
            .set_json(serde_json::json!({ "title": title })),
    )
    .await;
    assert_eq!(status, 201, "create habit: {body}");
    body["id"].as_str().expect("habit id").to_owned()
}
