use super::*;

#[test]
fn rate_limit_and_server_errors_are_retryable() {
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(LlmError::ApiRequest("timeout".into()).retryable());
}

#[test]
fn client_errors_are_not_retryable() {
    assert!(!LlmError::ApiResponse { status: 401, body: String::new() }.retryable());
    assert!(!LlmError::ApiParse("bad json".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "X".into() }.retryable());
}

#[test]
fn error_display_names_the_variable() {
    let err = LlmError::MissingApiKey { var: "OPENROUTER_API_KEY".into() };
    assert_eq!(err.to_string(), "missing API key: env var OPENROUTER_API_KEY not set");
}

#[test]
fn user_message_has_user_role() {
    let msg = Message::user("hi");
    assert_eq!(msg, Message { role: "user".into(), content: "hi".into() });
}
