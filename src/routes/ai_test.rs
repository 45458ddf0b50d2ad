use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crate::routes::api_routes;
use crate::state::AppState;
use crate::state::test_helpers::{MockLlm, demo_state};

async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = api_routes(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn idea_without_llm_returns_demo_idea() {
    let (status, body) =
        post_json(demo_state(), "/api/ai/idea", serde_json::json!({"input": "study tools", "interests": ["EdTech"]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "AI Study Buddy Platform");
    assert!(body["targetMarket"].is_string());
}

#[tokio::test]
async fn idea_uses_configured_llm() {
    let reply = r#"{"title":"Lab Swap","description":"Share lab gear","targetMarket":"Grad students","features":["Listings"],"challenges":["Trust"],"nextSteps":["Pilot"]}"#;
    let llm = Arc::new(MockLlm::replying(vec![Ok(reply.to_string())]));
    let state = AppState::new(Some(llm.clone()), None, None);
    let (status, body) = post_json(state, "/api/ai/idea", serde_json::json!({"input": "lab equipment"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Lab Swap");
    assert!(llm.calls.lock().unwrap()[0].2.contains("lab equipment"));
}

#[tokio::test]
async fn blank_idea_request_is_rejected() {
    let (status, body) = post_json(demo_state(), "/api/ai/idea", serde_json::json!({"input": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("interest"));
}

#[tokio::test]
async fn collaborators_default_skills_reach_prompt() {
    let llm = Arc::new(MockLlm::replying(vec![Err(503)]));
    let state = AppState::new(Some(llm.clone()), None, None);
    let (status, body) =
        post_json(state, "/api/ai/collaborators", serde_json::json!({"description": "tutoring marketplace"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["role"], "Technical Co-founder");
    assert!(llm.calls.lock().unwrap()[0].2.contains("Technical, Marketing, Design"));
}

#[tokio::test]
async fn collaborators_require_description() {
    let (status, _) = post_json(demo_state(), "/api/ai/collaborators", serde_json::json!({"description": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
