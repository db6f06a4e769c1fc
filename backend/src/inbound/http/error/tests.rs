//! Status mapping and payload redaction for API errors.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn trace_id() -> String {
    "7f0c2a1e-5b1d-4c7e-9f43-1a2b3c4d5e6f".to_owned()
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii trace id").to_owned());
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("title is required"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("missing bearer token"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("origin not allowed"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("habit not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already checked in"), StatusCode::BAD_REQUEST)]
#[case(Error::service_unavailable("database unavailable"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("pool exhausted"), StatusCode::INTERNAL_SERVER_ERROR)]
fn maps_codes_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[rstest]
#[actix_web::test]
async fn duplicate_checkin_returns_existing_record(trace_id: String) {
    let existing = json!({ "habitId": "3b8f", "date": "2026-03-04" });
    let error = Error::conflict("habit already checked in today")
        .with_trace_id(trace_id.clone())
        .with_details(existing.clone());

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(trace_id.as_str()));
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["details"], existing);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_hide_message_and_details(trace_id: String) {
    let error = Error::internal("connection refused by 10.0.0.4")
        .with_trace_id(trace_id.clone())
        .with_details(json!({ "dsn": "postgres://secret" }));

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(trace_id.as_str()));
    assert_eq!(body["message"], "Internal server error");
    assert!(body.get("details").is_none());
    assert_eq!(body["traceId"], trace_id);
}

#[rstest]
#[actix_web::test]
async fn untraced_errors_skip_the_header() {
    let error = Error::not_found("notification not found");

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none());
    assert_eq!(body, json!({ "code": "not_found", "message": "notification not found" }));
}

#[rstest]
fn actix_errors_become_opaque_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("payload too large").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert!(err.details().is_none());
}
