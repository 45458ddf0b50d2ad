//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The hosted-backend session, when
//! there is one, carries the bearer token every backend call needs.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use social::model::{AuthUser, Session, User};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// `None` in demo mode even when signed in.
    pub session: Option<Session>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    /// Starts loading: nothing is known until the stored session is checked.
    fn default() -> Self {
        Self { user: None, session: None, loading: true, error: None }
    }
}

impl AuthState {
    pub fn signed_in(user: User, session: Option<Session>) -> Self {
        Self { user: Some(user), session, loading: false, error: None }
    }

    pub fn signed_out() -> Self {
        Self { loading: false, ..Self::default() }
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Profile stand-in for an account whose `profiles` row is missing.
pub fn fallback_user(account: &AuthUser) -> User {
    let email = account.email.clone().unwrap_or_default();
    let username = account
        .username_hint()
        .map(str::to_owned)
        .or_else(|| email.split('@').next().filter(|s| !s.is_empty()).map(str::to_owned))
        .unwrap_or_else(|| "member".to_owned());
    User { id: account.id.clone(), username, email, bio: String::new(), interests: Vec::new() }
}
