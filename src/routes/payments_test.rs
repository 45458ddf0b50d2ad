use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::routes::api_routes;
use crate::services::stripe::{StripeClient, StripeConfig};
use crate::state::AppState;
use crate::state::test_helpers::demo_state;

fn live_state(server: &MockServer, origin: Option<&str>) -> AppState {
    let client = StripeClient::new(StripeConfig { secret_key: "sk_test_1".into(), api_base: server.uri() }).unwrap();
    AppState::new(None, Some(Arc::new(client)), origin.map(str::to_owned))
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = api_routes(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn create_request(body: &Value, origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::post("/api/create-payment-intent").header("content-type", "application/json");
    if let Some(origin) = origin {
        builder = builder.header("origin", origin);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn unconfigured_payments_answer_503_with_error_body() {
    let request = Request::get("/api/payment-history").body(Body::empty()).unwrap();
    let (status, body) = send(demo_state(), request).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn create_session_uses_caller_origin_for_return_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .and(body_string_contains("https%3A%2F%2Fnichenet.test%2Fpayment-success"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cs_test_1",
            "url": "https://checkout.stripe.test/c/cs_test_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = serde_json::json!({"amount": 100, "currency": "usd", "featureId": "ai-assistant"});
    let (status, json) = send(live_state(&server, None), create_request(&body, Some("https://nichenet.test"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sessionId"], "cs_test_1");
    assert_eq!(json["url"], "https://checkout.stripe.test/c/cs_test_1");
}

#[tokio::test]
async fn non_positive_amount_is_rejected_before_provider_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let body = serde_json::json!({"amount": 0, "featureId": "ai-assistant"});
    let (status, json) = send(live_state(&server, Some("https://nichenet.app")), create_request(&body, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Payment amount must be a positive number");
}

#[tokio::test]
async fn provider_message_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"message": "Amount must be at least $0.50 usd"}
        })))
        .mount(&server)
        .await;

    let body = serde_json::json!({"amount": 10});
    let (status, json) = send(live_state(&server, None), create_request(&body, None)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Amount must be at least $0.50 usd");
}

#[tokio::test]
async fn status_reports_succeeded_for_paid_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/checkout/sessions/cs_test_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cs_test_1", "status": "complete", "payment_status": "paid"
        })))
        .mount(&server)
        .await;

    let request = Request::get("/api/check-payment-status?session_id=cs_test_1").body(Body::empty()).unwrap();
    let (status, json) = send(live_state(&server, None), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "succeeded");
}

#[tokio::test]
async fn status_without_session_id_is_bad_request() {
    let server = MockServer::start().await;
    let request = Request::get("/api/check-payment-status").body(Body::empty()).unwrap();
    let (status, json) = send(live_state(&server, None), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Payment session ID not found");
}

#[tokio::test]
async fn history_lists_transactions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payment_intents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": [
            {"id": "pi_1", "amount": 100, "currency": "usd", "status": "succeeded", "created": 1_705_314_600, "description": "Ai Assistant"}
        ]})))
        .mount(&server)
        .await;

    let request = Request::get("/api/payment-history").body(Body::empty()).unwrap();
    let (status, json) = send(live_state(&server, None), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transactions"][0]["id"], "pi_1");
    assert_eq!(json["transactions"][0]["amount"], 100);
}
