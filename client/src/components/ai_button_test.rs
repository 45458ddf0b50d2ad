use super::*;

#[test]
fn labels_match_actions() {
    assert_eq!(AiAction::GenerateIdea.label(), "Generate Idea");
    assert_eq!(AiAction::FindCollaborators.label(), "Find Collaborators");
}

#[test]
fn actions_have_distinct_styles() {
    assert_ne!(AiAction::GenerateIdea.css_modifier(), AiAction::FindCollaborators.css_modifier());
}
