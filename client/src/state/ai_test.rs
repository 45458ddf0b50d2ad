use super::*;

fn idea(title: &str) -> IdeaDraft {
    IdeaDraft { title: title.to_owned(), description: "d".to_owned(), ..IdeaDraft::default() }
}

#[test]
fn default_state_is_locked_and_idle() {
    let state = AiState::default();
    assert_eq!(state.gate, PremiumGate::Locked);
    assert!(!state.can_generate());
    assert!(!state.can_find_collaborators());
}

#[test]
fn generate_requires_non_blank_input_and_idle() {
    let mut state = AiState { input: "   ".to_owned(), ..AiState::default() };
    assert!(!state.can_generate());
    state.input = "study tools".to_owned();
    assert!(state.can_generate());
    state.loading = true;
    assert!(!state.can_generate());
}

#[test]
fn new_idea_resets_collaborators_and_saved_flag() {
    let mut state = AiState::default();
    state.show_idea(idea("First"));
    state.collaborators.push(Collaborator {
        role: "Designer".to_owned(),
        skills: vec![],
        responsibilities: String::new(),
        importance: String::new(),
    });
    state.saved = true;
    state.loading = true;
    state.show_idea(idea("Second"));
    assert!(state.collaborators.is_empty());
    assert!(!state.saved);
    assert!(!state.loading);
    assert_eq!(state.idea.as_ref().map(|i| i.title.as_str()), Some("Second"));
    assert!(state.can_find_collaborators());
}
