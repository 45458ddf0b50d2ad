use super::*;

fn form(username: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
    RegisterForm {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm: confirm.to_owned(),
    }
}

#[test]
fn valid_form_has_no_errors() {
    assert!(check_register(&form("ada_l", "ada@example.edu", "Abcdef12", "Abcdef12")).is_empty());
}

#[test]
fn weak_password_and_mismatch_are_reported_separately() {
    let errors = check_register(&form("ada_l", "ada@example.edu", "abcdef12", "abcdef13"));
    assert_eq!(errors.password.as_deref(), Some("Password must contain at least one uppercase letter"));
    assert_eq!(errors.confirm.as_deref(), Some("Passwords do not match"));
    assert!(errors.username.is_none());
    assert!(errors.email.is_none());
}

#[test]
fn short_username_is_rejected() {
    let errors = check_register(&form("ab", "ada@example.edu", "Abcdef12", "Abcdef12"));
    assert!(errors.username.is_some());
}
