use super::*;

#[test]
fn check_login_requires_both_fields() {
    let errors = check_login("", "");
    assert_eq!(errors.email.as_deref(), Some("Email is required"));
    assert_eq!(errors.password.as_deref(), Some("Password is required"));
    assert!(!errors.is_empty());
}

#[test]
fn check_login_rejects_malformed_email() {
    let errors = check_login("user.example.com", "secret");
    assert_eq!(errors.email.as_deref(), Some("Invalid email format"));
    assert!(errors.password.is_none());
}

#[test]
fn check_login_accepts_any_non_empty_password() {
    assert!(check_login(" user@example.edu ", "x").is_empty());
}
