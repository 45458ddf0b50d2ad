use super::*;
use time::macros::datetime;

#[test]
fn mode_follows_publishable_key() {
    assert_eq!(PaymentMode::from_publishable_key(None), PaymentMode::Demo);
    assert_eq!(PaymentMode::from_publishable_key(Some(" ")), PaymentMode::Demo);
    assert_eq!(PaymentMode::from_publishable_key(Some("pk_test_123")), PaymentMode::Live);
}

#[test]
fn demo_session_uses_fixed_ids() {
    let session = demo_session();
    assert_eq!(session.session_id, "demo-session-id");
    assert_eq!(session.client_secret.as_deref(), Some("demo-client-secret"));
    assert!(session.url.is_none());
}

#[test]
fn demo_history_has_two_usd_rows_a_day_apart() {
    let now = datetime!(2024-06-01 12:00 UTC);
    let history = demo_history(now);
    assert_eq!(history.len(), 2);
    assert_eq!((history[0].id.as_str(), history[0].amount), ("demo-tx-1", 500));
    assert_eq!((history[1].id.as_str(), history[1].amount), ("demo-tx-2", 200));
    assert_eq!(history[0].created - history[1].created, Duration::days(1));
    assert!(history.iter().all(|t| t.currency == "usd" && t.status == "succeeded"));
}

#[test]
fn create_request_serializes_camel_case_and_validates_amount() {
    let req = CreateSessionRequest::new(AI_ASSISTANT_PRICE_CENTS, "usd", AI_ASSISTANT_FEATURE_ID);
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json, serde_json::json!({"amount": 100, "currency": "usd", "featureId": "ai-assistant"}));
    assert!(req.validate().is_ok());
    assert!(CreateSessionRequest::new(0, "usd", "x").validate().is_err());
}

#[test]
fn create_request_defaults_currency() {
    let req: CreateSessionRequest = serde_json::from_str(r#"{"amount":250}"#).unwrap();
    assert_eq!(req.currency, "usd");
    assert_eq!(req.feature_id, "");
}

#[test]
fn session_reads_host_response() {
    let session: PaymentSession =
        serde_json::from_str(r#"{"sessionId":"cs_1","url":"https://checkout.example/cs_1"}"#).unwrap();
    assert_eq!(session.session_id, "cs_1");
    assert_eq!(session.url.as_deref(), Some("https://checkout.example/cs_1"));
}

#[test]
fn return_urls_are_built_from_origin() {
    assert_eq!(
        success_url("https://nichenet.app/"),
        "https://nichenet.app/payment-success?session_id={CHECKOUT_SESSION_ID}"
    );
    assert_eq!(cancel_url("http://localhost:3000"), "http://localhost:3000/ai-assistant");
}

#[test]
fn verification_maps_provider_status() {
    assert_eq!(Verification::from_status("succeeded"), Verification::Succeeded);
    assert_eq!(Verification::from_status("paid"), Verification::Succeeded);
    assert_eq!(Verification::from_status("unpaid"), Verification::Pending("unpaid".to_owned()));
    assert!(matches!(Verification::missing_session(), Verification::Failed(_)));
}

#[test]
fn premium_gate_unlocks_on_success_and_failure() {
    let mut gate = PremiumGate::default();
    assert!(gate.begin());
    assert_eq!(gate, PremiumGate::Unlocking);
    assert!(!gate.begin());
    gate.finish::<String>(&Ok(demo_session()));
    assert!(gate.is_unlocked());

    let mut gate = PremiumGate::default();
    gate.begin();
    gate.finish::<String>(&Err("card declined".to_owned()));
    assert!(gate.is_unlocked());
    assert!(!gate.begin());
}
