use super::*;
use std::collections::HashMap;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> StripeClient {
    StripeClient::new(StripeConfig { secret_key: "sk_test_1".into(), api_base: server.uri() }).unwrap()
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn config_reads_key_through_pointer_variable() {
    let cfg = StripeConfig::from_lookup(lookup(&[("STRIPE_SECRET_KEY_ENV", "SK"), ("SK", "sk_live")])).unwrap();
    assert_eq!(cfg.secret_key, "sk_live");
    assert_eq!(cfg.api_base, DEFAULT_API_BASE);
}

#[test]
fn config_missing_is_not_configured() {
    let err = StripeConfig::from_lookup(lookup(&[])).unwrap_err();
    assert!(matches!(err, PaymentError::NotConfigured { var } if var == "STRIPE_SECRET_KEY_ENV"));
}

// =============================================================================
// WIRE HELPERS
// =============================================================================

#[test]
fn checkout_form_carries_amount_and_return_urls() {
    let req = CreateSessionRequest::new(100, "USD", "ai-assistant");
    let form: HashMap<_, _> = checkout_form(&req, "https://nichenet.app").into_iter().collect();
    assert_eq!(form["mode"], "payment");
    assert_eq!(form["line_items[0][price_data][unit_amount]"], "100");
    assert_eq!(form["line_items[0][price_data][currency]"], "usd");
    assert_eq!(form["line_items[0][price_data][product_data][name]"], "Ai Assistant");
    assert_eq!(form["success_url"], "https://nichenet.app/payment-success?session_id={CHECKOUT_SESSION_ID}");
}

#[test]
fn session_status_is_normalized() {
    assert_eq!(normalize_session_status(&serde_json::json!({"payment_status": "paid"})), "succeeded");
    assert_eq!(normalize_session_status(&serde_json::json!({"payment_status": "unpaid"})), "unpaid");
    assert_eq!(normalize_session_status(&serde_json::json!({"status": "open"})), "open");
}

#[test]
fn session_ids_are_single_segments() {
    assert!(is_session_id("cs_test_a1B2c3"));
    assert!(!is_session_id("../../payment_intents/pi_secret"));
    assert!(!is_session_id("cs_1/../x"));
    assert!(!is_session_id("cs_1?expand=x"));
    assert!(!is_session_id(""));
}

#[test]
fn history_rows_convert_unix_created() {
    let body = serde_json::json!({"data": [
        {"id": "pi_1", "amount": 500, "currency": "usd", "status": "succeeded", "created": 1_705_314_600, "description": null}
    ]});
    let rows = parse_history(&body).unwrap();
    assert_eq!(rows[0].id, "pi_1");
    assert_eq!(rows[0].created.unix_timestamp(), 1_705_314_600);
    assert_eq!(rows[0].description, "");
    assert!(parse_history(&serde_json::json!({})).is_err());
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[tokio::test]
async fn create_checkout_session_posts_form_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .and(header("authorization", "Bearer sk_test_1"))
        .and(body_string_contains("mode=payment"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "cs_1", "url": "https://pay.example/cs_1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .create_checkout_session(&CreateSessionRequest::new(100, "usd", "ai-assistant"), "http://localhost:3000")
        .await
        .unwrap();
    assert_eq!(session.session_id, "cs_1");
    assert_eq!(session.url.as_deref(), Some("https://pay.example/cs_1"));
}

#[tokio::test]
async fn non_positive_amount_is_rejected_locally() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .create_checkout_session(&CreateSessionRequest::new(0, "usd", "x"), "http://localhost:3000")
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::InvalidRequest(_)));
}

#[tokio::test]
async fn provider_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/checkout/sessions/cs_missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": {"message": "No such checkout.session"}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).session_status("cs_missing").await.unwrap_err();
    assert!(matches!(err, PaymentError::Provider { status: 404, message } if message == "No such checkout.session"));
}

#[tokio::test]
async fn session_status_rejects_path_traversal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payment_intents/pi_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "requires_capture"})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).session_status("../../payment_intents/pi_secret").await.unwrap_err();
    assert!(matches!(err, PaymentError::InvalidRequest(_)));
}

#[tokio::test]
async fn payment_history_lists_intents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payment_intents"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": [
            {"id": "pi_2", "amount": 200, "currency": "usd", "status": "succeeded", "created": 1_705_000_000, "description": "Advanced AI Idea Generation"}
        ]})))
        .mount(&server)
        .await;

    let rows = client_for(&server).payment_history().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Advanced AI Idea Generation");
}
