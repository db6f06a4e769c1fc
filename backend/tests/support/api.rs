//! HTTP helpers shared by integration test crates.
//!
//! Each test crate under `backend/tests/` compiles separately; include this
//! file with `#[path = "support/api.rs"]`.

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use habitwise::Trace;
use habitwise::inbound::http::configure_api;
use habitwise::inbound::http::state::HttpState;
use habitwise::test_support::{MemoryBackend, dev_bearer};

/// Wednesday morning; every suite starts its clock here.
pub const START: &str = "2026-03-04T09:00:00Z";

pub fn start() -> DateTime<Utc> {
    START.parse().expect("fixture instant")
}

pub fn backend() -> MemoryBackend {
    MemoryBackend::starting_at(start())
}

/// Run `request` against the `/api/v1` scope and decode the JSON body.
pub async fn send_json(state: &HttpState, request: test::TestRequest) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await;
    let response: ServiceResponse = test::call_service(&app, request.to_request()).await;
    let status = response.status().as_u16();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

pub fn get(uri: &str, owner: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .insert_header(dev_bearer(owner))
}

pub fn post(uri: &str, owner: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(dev_bearer(owner))
}

/// Create a habit for `owner` and return its id.
pub async fn create_habit(state: &HttpState, owner: &str, body: Value) -> String {
    let (status, created) = send_json(state, post("/api/v1/habits", owner).set_json(body)).await;
    assert_eq!(status, 201, "create habit: {created}");
    created["id"].as_str().expect("habit id").to_owned()
}

/// Create a plain daily habit titled `title`.
pub async fn create_daily_habit(state: &HttpState, owner: &str, title: &str) -> String {
    create_habit(state, owner, json!({ "title": title })).await
}
