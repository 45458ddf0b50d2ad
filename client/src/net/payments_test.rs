use super::*;

#[test]
fn status_endpoint_keeps_session_id_characters() {
    assert_eq!(status_endpoint("cs_test_a1B2"), "/api/check-payment-status?session_id=cs_test_a1B2");
}

#[test]
fn status_endpoint_escapes_query_breaking_characters() {
    assert_eq!(status_endpoint("cs_1&admin=1"), "/api/check-payment-status?session_id=cs_1%26admin%3D1");
}

#[test]
fn error_message_prefers_host_body() {
    assert_eq!(error_message(502, r#"{"error":"Card declined"}"#), "Card declined");
    assert_eq!(error_message(500, "<html>"), "payment request failed: 500");
}
