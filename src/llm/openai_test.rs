use super::*;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(text: &str, finish: &str) -> Value {
    serde_json::json!({
        "model": "google/gemini-2.0-flash-001",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": finish
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
}

// ===== parsing =====

#[test]
fn parse_text_response() {
    let resp = parse_chat_completions_response(&completion("Hello!", "stop").to_string()).unwrap();
    assert_eq!(resp.text, "Hello!");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 10);
    assert_eq!(resp.output_tokens, 5);
}

#[test]
fn parse_length_finish_is_max_tokens() {
    let resp = parse_chat_completions_response(&completion("cut", "length").to_string()).unwrap();
    assert_eq!(resp.stop_reason, "max_tokens");
}

#[test]
fn parse_content_parts() {
    let json = serde_json::json!({
        "choices": [{ "message": { "content": [{ "type": "text", "text": "a" }, { "type": "text", "text": "b" }] } }]
    });
    let resp = parse_chat_completions_response(&json.to_string()).unwrap();
    assert_eq!(resp.text, "ab");
}

#[test]
fn parse_missing_choices() {
    let json = serde_json::json!({ "model": "x", "choices": [] }).to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(LlmError::ApiParse(_))));
    assert!(parse_chat_completions_response("not json").is_err());
}

#[test]
fn system_prompt_leads_messages() {
    let msgs = [Message::user("hi")];
    let built = build_messages("be brief", &msgs);
    assert_eq!(built.len(), 2);
    assert_eq!((built[0].role, built[0].content), ("system", "be brief"));
    assert_eq!(build_messages("  ", &msgs).len(), 1);
}

// ===== transport =====

#[tokio::test]
async fn chat_posts_sampling_and_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "m",
            "max_tokens": 800,
            "messages": [{ "role": "system", "content": "sys" }, { "role": "user", "content": "go" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok", "stop")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new("sk-test".into(), format!("{}/api/v1/", server.uri()), LlmTimeouts::default()).unwrap();
    let sampling = Sampling { max_tokens: 800, temperature: 0.6 };
    let resp = client.chat("m", sampling, "sys", &[Message::user("go")]).await.unwrap();
    assert_eq!(resp.text, "ok");
}

#[tokio::test]
async fn chat_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = OpenAiClient::new("k".into(), server.uri(), LlmTimeouts::default()).unwrap();
    let sampling = Sampling { max_tokens: 10, temperature: 0.0 };
    let err = client.chat("m", sampling, "", &[Message::user("x")]).await.unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 401, body } if body == "bad key"));
}
