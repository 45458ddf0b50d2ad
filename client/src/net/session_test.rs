use super::*;

#[test]
fn demo_user_keeps_seeded_profile() {
    let user = demo_user(None, "");
    assert_eq!(user.username, "student_builder");
    assert_eq!(user.id, "1");
    assert!(!user.interests.is_empty());
}

#[test]
fn demo_user_takes_typed_identity() {
    let user = demo_user(Some(" ada_l "), "ada@example.edu");
    assert_eq!(user.username, "ada_l");
    assert_eq!(user.email, "ada@example.edu");
}

#[test]
fn demo_user_ignores_blank_username() {
    let user = demo_user(Some("   "), "x@example.edu");
    assert_eq!(user.username, "student_builder");
}
