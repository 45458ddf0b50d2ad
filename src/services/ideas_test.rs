use super::*;
use crate::state::test_helpers::MockLlm;

// =========================================================================
// generate_idea
// =========================================================================

#[tokio::test]
async fn idea_without_llm_is_demo() {
    let idea = generate_idea(None, "anything", &[]).await;
    assert_eq!(idea, demo_idea());
}

#[tokio::test]
async fn idea_parses_fenced_json_and_uses_idea_sampling() {
    let reply = "```json\n{\"title\":\"Lab Link\",\"description\":\"d\",\"targetMarket\":\"labs\",\"features\":[\"a\"],\"challenges\":\"c\",\"nextSteps\":\"n\"}\n```";
    let llm = MockLlm::replying(vec![Ok(reply.to_string())]);
    let interests = vec!["Biotech".to_string(), "AI".to_string()];
    let idea = generate_idea(Some(&llm), "shared lab equipment", &interests).await;
    assert_eq!(idea.title, "Lab Link");

    let calls = llm.calls.lock().unwrap();
    let (sampling, system, prompt) = &calls[0];
    assert_eq!(sampling.max_tokens, 1000);
    assert!((sampling.temperature - 0.7).abs() < f32::EPSILON);
    assert!(system.starts_with("You are an expert startup advisor"));
    assert!(prompt.contains("Interests: Biotech, AI"));
}

#[tokio::test]
async fn idea_prose_reply_uses_parse_fallback() {
    let llm = MockLlm::replying(vec![Ok("Try a campus food-sharing app.".to_string())]);
    let idea = generate_idea(Some(&llm), "food", &[]).await;
    assert_eq!(idea.title, "AI-Powered Startup Idea");
    assert_eq!(idea.description, "Try a campus food-sharing app.");
}

#[tokio::test]
async fn idea_transport_failure_is_demo() {
    let llm = MockLlm::replying(vec![Err(503)]);
    assert_eq!(generate_idea(Some(&llm), "x", &[]).await, demo_idea());
}

// =========================================================================
// find_collaborators
// =========================================================================

#[tokio::test]
async fn collaborators_parse_list_with_collaborator_sampling() {
    let llm = MockLlm::replying(vec![Ok(r#"[{"role":"Designer","skills":["Figma"],"responsibilities":"UI","importance":"UX"}]"#.to_string())]);
    let skills = vec!["Design".to_string()];
    let found = find_collaborators(Some(&llm), "idea", &skills).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].role, "Designer");

    let calls = llm.calls.lock().unwrap();
    assert_eq!(calls[0].0.max_tokens, 800);
    assert!(calls[0].2.contains("Skills needed: Design"));
}

#[tokio::test]
async fn collaborators_fall_back_on_failure_or_garbage() {
    let llm = MockLlm::replying(vec![Err(500), Ok("not json".to_string())]);
    assert_eq!(find_collaborators(Some(&llm), "idea", &[]).await, demo_collaborators());
    assert_eq!(find_collaborators(Some(&llm), "idea", &[]).await, demo_collaborators());
    assert_eq!(find_collaborators(None, "idea", &[]).await, demo_collaborators());
}
