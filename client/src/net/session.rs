//! Sign-in lifecycle shared by the root component and the auth pages.
//!
//! Without a backend the "account" is the seeded demo user, kept in
//! `localStorage` so a reload stays signed in. With a backend the stored
//! session is re-validated on start and persisted after every sign-in.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use social::model::{ProfileUpdate, Session, User};
use social::store::AppStore;

use super::supabase;
use crate::state::auth::AuthState;
use crate::util::{clock, env, storage};

/// Outcome of a successful sign-up.
pub enum Registered {
    SignedIn,
    /// The backend wants the address confirmed before a session exists.
    ConfirmEmail,
}

/// Restore whoever was signed in before the reload.
pub async fn restore(auth: RwSignal<AuthState>, store: RwSignal<AppStore>) {
    if env::is_demo() {
        match storage::load_json::<User>(storage::DEMO_USER_KEY) {
            Some(user) => finish_sign_in(auth, store, user, None),
            None => auth.set(AuthState::signed_out()),
        }
        return;
    }

    let Some(session) = storage::load_json::<Session>(storage::SESSION_KEY) else {
        auth.set(AuthState::signed_out());
        return;
    };
    if session.is_expired(clock::now()) {
        storage::remove(storage::SESSION_KEY);
        auth.set(AuthState::signed_out());
        return;
    }
    match supabase::restore(&session).await {
        Ok(user) => {
            finish_sign_in(auth, store, user, Some(session));
            load_ideas(auth, store).await;
        }
        Err(e) => {
            leptos::logging::warn!("stored session rejected: {e}");
            storage::remove(storage::SESSION_KEY);
            auth.set(AuthState::signed_out());
        }
    }
}

/// # Errors
///
/// The backend's message for bad credentials or a transport failure.
pub async fn sign_in(auth: RwSignal<AuthState>, store: RwSignal<AppStore>, email: &str, password: &str) -> Result<(), String> {
    if env::is_demo() {
        let user = demo_user(None, email);
        storage::save_json(storage::DEMO_USER_KEY, &user);
        finish_sign_in(auth, store, user, None);
        return Ok(());
    }
    let (session, user) = supabase::sign_in(email, password).await.map_err(|e| {
        leptos::logging::warn!("sign in failed: {e}");
        e.to_string()
    })?;
    storage::save_json(storage::SESSION_KEY, &session);
    finish_sign_in(auth, store, user, Some(session));
    load_ideas(auth, store).await;
    Ok(())
}

/// # Errors
///
/// The backend's message, e.g. an address already registered.
pub async fn register(
    auth: RwSignal<AuthState>,
    store: RwSignal<AppStore>,
    username: &str,
    email: &str,
    password: &str,
) -> Result<Registered, String> {
    if env::is_demo() {
        let user = demo_user(Some(username), email);
        storage::save_json(storage::DEMO_USER_KEY, &user);
        finish_sign_in(auth, store, user, None);
        return Ok(Registered::SignedIn);
    }
    let outcome = supabase::sign_up(email, password, username, clock::now()).await.map_err(|e| {
        leptos::logging::warn!("sign up failed: {e}");
        e.to_string()
    })?;
    match outcome {
        Some((session, user)) => {
            storage::save_json(storage::SESSION_KEY, &session);
            finish_sign_in(auth, store, user, Some(session));
            Ok(Registered::SignedIn)
        }
        None => Ok(Registered::ConfirmEmail),
    }
}

/// Sign out locally whatever the backend says.
pub async fn sign_out(auth: RwSignal<AuthState>, store: RwSignal<AppStore>) {
    if let Some(token) = auth.get_untracked().token().map(str::to_owned) {
        if let Err(e) = supabase::sign_out(&token).await {
            leptos::logging::warn!("sign out failed: {e}");
        }
    }
    storage::remove(storage::SESSION_KEY);
    storage::remove(storage::DEMO_USER_KEY);
    storage::remove(storage::PREMIUM_KEY);
    store.update(|s| {
        s.teardown();
        if env::is_demo() {
            *s = AppStore::seeded();
            s.set_user(None);
        }
    });
    auth.set(AuthState::signed_out());
}

/// Save profile edits, remotely when there is a backend.
///
/// # Errors
///
/// Any backend failure; local state is left unchanged.
pub async fn update_profile(auth: RwSignal<AuthState>, store: RwSignal<AppStore>, changes: ProfileUpdate) -> Result<(), String> {
    let state = auth.get_untracked();
    let user = match (state.token(), state.user_id()) {
        (Some(token), Some(user_id)) if !env::is_demo() => supabase::update_profile(token, user_id, &changes)
            .await
            .map_err(|e| {
                leptos::logging::warn!("profile update failed: {e}");
                e.to_string()
            })?,
        _ => {
            let mut local = store.get_untracked();
            local.update_profile(&changes);
            let Some(user) = local.user else {
                return Err("Not signed in".to_owned());
            };
            if env::is_demo() {
                storage::save_json(storage::DEMO_USER_KEY, &user);
            }
            user
        }
    };
    store.update(|s| s.set_user(Some(user.clone())));
    auth.update(|a| a.user = Some(user));
    Ok(())
}

fn finish_sign_in(auth: RwSignal<AuthState>, store: RwSignal<AppStore>, user: User, session: Option<Session>) {
    store.update(|s| s.set_user(Some(user.clone())));
    auth.set(AuthState::signed_in(user, session));
}

async fn load_ideas(auth: RwSignal<AuthState>, store: RwSignal<AppStore>) {
    let state = auth.get_untracked();
    let (Some(token), Some(user_id)) = (state.token(), state.user_id()) else {
        return;
    };
    match supabase::fetch_ideas(token, user_id).await {
        Ok(ideas) => store.update(|s| s.replace_ideas(ideas)),
        Err(e) => leptos::logging::warn!("failed to load saved ideas: {e}"),
    }
}

/// The seeded member, renamed to what the visitor typed.
pub fn demo_user(username: Option<&str>, email: &str) -> User {
    let mut user = AppStore::seeded().user.unwrap_or_else(|| User {
        id: "1".to_owned(),
        username: "member".to_owned(),
        email: String::new(),
        bio: String::new(),
        interests: Vec::new(),
    });
    if let Some(name) = username.map(str::trim).filter(|n| !n.is_empty()) {
        name.clone_into(&mut user.username);
    }
    let email = email.trim();
    if !email.is_empty() {
        email.clone_into(&mut user.email);
    }
    user
}
