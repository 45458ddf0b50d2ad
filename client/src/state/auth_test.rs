use super::*;

fn account(metadata: serde_json::Value, email: Option<&str>) -> AuthUser {
    AuthUser { id: "acc-1".to_owned(), email: email.map(str::to_owned), user_metadata: metadata }
}

#[test]
fn default_state_is_loading_without_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.is_authenticated());
    assert_eq!(state.token(), None);
}

#[test]
fn signed_in_exposes_token_and_user_id() {
    let acc = account(serde_json::json!({}), Some("sam@example.edu"));
    let session = Session { access_token: "tok".to_owned(), refresh_token: String::new(), expires_at: None, user: acc.clone() };
    let state = AuthState::signed_in(fallback_user(&acc), Some(session));
    assert!(!state.loading);
    assert_eq!(state.token(), Some("tok"));
    assert_eq!(state.user_id(), Some("acc-1"));
}

#[test]
fn fallback_user_prefers_signup_username() {
    let user = fallback_user(&account(serde_json::json!({"username": "lab_rat"}), Some("sam@example.edu")));
    assert_eq!(user.username, "lab_rat");
    assert_eq!(user.email, "sam@example.edu");
}

#[test]
fn fallback_user_uses_email_local_part_then_placeholder() {
    assert_eq!(fallback_user(&account(serde_json::Value::Null, Some("sam@example.edu"))).username, "sam");
    assert_eq!(fallback_user(&account(serde_json::Value::Null, None)).username, "member");
}

#[test]
fn signed_out_is_not_loading() {
    let state = AuthState::signed_out();
    assert!(!state.loading);
    assert!(state.user.is_none());
}
