use super::*;

// =============================================================
// ErrorPayload classification
// =============================================================

#[test]
fn empty_body_is_absent() {
    assert_eq!(ErrorPayload::from_body(""), ErrorPayload::Absent);
    assert_eq!(ErrorPayload::from_body("  \n"), ErrorPayload::Absent);
}

#[test]
fn null_and_scalars_are_absent() {
    assert_eq!(ErrorPayload::from_body("null"), ErrorPayload::Absent);
    assert_eq!(ErrorPayload::from_body("42"), ErrorPayload::Absent);
    assert_eq!(ErrorPayload::from_body("true"), ErrorPayload::Absent);
}

#[test]
fn non_json_body_is_text() {
    assert_eq!(
        ErrorPayload::from_body("Internal Server Error"),
        ErrorPayload::Text("Internal Server Error".to_owned())
    );
}

#[test]
fn json_string_is_unquoted_text() {
    assert_eq!(ErrorPayload::from_body("\"gone\""), ErrorPayload::Text("gone".to_owned()));
}

#[test]
fn json_array_is_list() {
    let payload = ErrorPayload::from_body(r#"[{"msg":"a"}]"#);
    assert!(matches!(payload, ErrorPayload::List(items) if items.len() == 1));
}

#[test]
fn json_object_is_object() {
    let payload = ErrorPayload::from_body(r#"{"detail":"nope"}"#);
    assert!(matches!(payload, ErrorPayload::Object(map) if map.contains_key("detail")));
}

// =============================================================
// ApiError
// =============================================================

#[test]
fn from_status_maps_401_to_unauthorized() {
    let err = ApiError::from_status(401, r#"{"detail":"Could not validate credentials"}"#);
    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));
}

#[test]
fn from_status_maps_404_to_not_found() {
    let err = ApiError::from_status(404, r#"{"detail":"Post not found"}"#);
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[test]
fn from_status_keeps_other_codes() {
    let err = ApiError::from_status(422, "[]");
    assert!(matches!(err, ApiError::Status { status: 422, payload: ErrorPayload::List(_) }));
}

#[test]
fn status_message_names_the_code() {
    let err = ApiError::from_status(500, "");
    assert_eq!(err.message().as_deref(), Some("Request failed with status code 500"));
}

#[test]
fn transport_error_has_no_payload_or_message() {
    let err = ApiError::Transport("connection refused".to_owned());
    assert!(err.payload().is_none());
    assert!(err.message().is_none());
    assert_eq!(err.status(), None);
}

#[test]
fn decode_error_message_is_display() {
    let err = ApiError::Decode("missing field `id`".to_owned());
    assert_eq!(err.message().as_deref(), Some("response decode failed: missing field `id`"));
}

#[test]
fn normalized_transport_error_uses_default() {
    let err = ApiError::Transport("dns error".to_owned());
    assert_eq!(err.normalized("Login failed."), "Login failed.");
}

#[test]
fn normalized_status_error_reads_detail() {
    let err = ApiError::from_status(400, r#"{"detail":"A user with this email already exists"}"#);
    assert_eq!(err.normalized("Registration failed."), "A user with this email already exists");
}
