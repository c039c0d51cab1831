//! Tests for error codes and their JSON shape.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(ErrorCode::InvalidRequest, false)]
#[case(ErrorCode::Unauthorized, false)]
#[case(ErrorCode::Forbidden, false)]
#[case(ErrorCode::ServiceUnavailable, true)]
#[case(ErrorCode::InternalError, false)]
fn only_outages_are_retryable(#[case] code: ErrorCode, #[case] retryable: bool) {
    assert_eq!(code.is_retryable(), retryable);
    assert_eq!(DomainError::new(code, "x").is_retryable(), retryable);
}

#[rstest]
#[case(ErrorCode::InvalidRequest)]
#[case(ErrorCode::Unauthorized)]
#[case(ErrorCode::Forbidden)]
#[case(ErrorCode::ServiceUnavailable)]
#[case(ErrorCode::InternalError)]
fn wire_name_matches_serde(#[case] code: ErrorCode) {
    assert_eq!(
        serde_json::to_value(code).expect("serialise code"),
        json!(code.as_str())
    );
    assert_eq!(code.to_string(), code.as_str());
}

#[rstest]
#[case("")]
#[case(" \t ")]
fn blank_messages_fall_back_to_the_code_message(#[case] message: &str) {
    let err = DomainError::forbidden(message);
    assert_eq!(err.message(), "Sign-in is not allowed for this account");
    assert_eq!(err.to_string(), err.message());
}

#[rstest]
fn details_are_serialised_only_when_present() {
    let bare = serde_json::to_value(DomainError::unauthorized("Invalid email or password"))
        .expect("serialise");
    assert_eq!(
        bare,
        json!({ "code": "unauthorized", "message": "Invalid email or password" })
    );

    let detailed = DomainError::service_unavailable("directory down")
        .with_details(json!({ "cause": "connection refused" }));
    assert_eq!(
        detailed.details(),
        Some(&json!({ "cause": "connection refused" }))
    );
    assert_eq!(
        serde_json::to_value(&detailed).expect("serialise")["details"]["cause"],
        "connection refused"
    );
}
