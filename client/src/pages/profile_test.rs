use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        username: "alex".to_owned(),
        email: "alex@uni.edu".to_owned(),
        bio: "Builder".to_owned(),
        interests: vec!["AI".to_owned()],
    }
}

#[test]
fn interests_are_trimmed_and_deduplicated() {
    assert_eq!(parse_interests(" AI, Climate Tech ,,ai, "), vec!["AI", "Climate Tech"]);
    assert!(parse_interests("  ").is_empty());
}

#[test]
fn unchanged_form_produces_empty_update() {
    let changes = profile_changes(&user(), "alex", "alex@uni.edu", "Builder", "AI").unwrap();
    assert_eq!(changes, ProfileUpdate::default());
}

#[test]
fn only_changed_fields_are_sent() {
    let changes = profile_changes(&user(), "alex", "alex@uni.edu", "Maker", "AI, Music").unwrap();
    assert_eq!(changes.username, None);
    assert_eq!(changes.bio.as_deref(), Some("Maker"));
    assert_eq!(changes.interests, Some(vec!["AI".to_owned(), "Music".to_owned()]));
}

#[test]
fn invalid_email_is_rejected() {
    assert_eq!(profile_changes(&user(), "alex", "nope", "", "").unwrap_err(), "Invalid email format");
}
