//! Regression coverage for domain errors.

use rstest::rstest;
use serde_json::{Value, json};

use super::*;

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn blank_message_falls_back_to_code_text() {
    let error = Error::conflict("   ");
    assert_eq!(error.message(), "resource already exists");
}

#[rstest]
fn serialises_with_snake_case_code_and_omits_empty_fields() {
    let value = serde_json::to_value(Error::not_found("habit not found")).expect("json");
    assert_eq!(value, json!({ "code": "not_found", "message": "habit not found" }));
}

#[rstest]
fn serialises_details_and_trace_id() {
    let error = Error::conflict("already checked in today")
        .with_trace_id("abc")
        .with_details(json!({ "checkin": { "id": "1" } }));
    let value = serde_json::to_value(&error).expect("json");
    assert_eq!(value.get("traceId").and_then(Value::as_str), Some("abc"));
    assert_eq!(value["details"]["checkin"]["id"], "1");
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-0000000000aa"
        .parse()
        .expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some("00000000-0000-0000-0000-0000000000aa"));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::forbidden("nope").to_string(), "nope");
}
