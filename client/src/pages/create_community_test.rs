use super::*;

fn draft(name: &str, description: &str, topic: &str) -> CommunityDraft {
    CommunityDraft { name: name.to_owned(), description: description.to_owned(), topic: topic.to_owned() }
}

#[test]
fn complete_draft_passes() {
    assert!(check_community(&draft("Rust Robotics", "Robots written in Rust", "Programming")).is_empty());
}

#[test]
fn blank_description_and_topic_are_required() {
    let errors = check_community(&draft("Rust Robotics", "  ", ""));
    assert_eq!(errors.description.as_deref(), Some("Description is required"));
    assert_eq!(errors.topic.as_deref(), Some("Topic is required"));
    assert!(errors.name.is_none());
}

#[test]
fn short_name_is_rejected() {
    assert!(check_community(&draft("ab", "desc", "topic")).name.is_some());
}
