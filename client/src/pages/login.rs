//! Email + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use social::store::AppStore;
use social::validate::validate_email;

use crate::components::text_field::TextField;
use crate::state::auth::AuthState;

/// Field messages for the sign-in form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Only presence and email shape are checked here; the backend judges the
/// password.
pub fn check_login(email: &str, password: &str) -> LoginErrors {
    LoginErrors {
        email: validate_email(email.trim()).err().map(str::to_owned),
        password: password.is_empty().then(|| "Password is required".to_owned()),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(LoginErrors::default());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Already signed in (e.g. restored session): go to the dashboard.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if auth.get().is_authenticated() {
            navigate_home("/", NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        let checked = check_login(&email_value, &password_value);
        let ok = checked.is_empty();
        errors.set(checked);
        if !ok {
            return;
        }
        busy.set(true);
        form_error.set(None);
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::session::sign_in(auth, store, &email_value, &password_value).await {
                form_error.set(Some(e));
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-card__brand">
                    <span class="logo-mark">"N"</span>
                    <h1>"Sign in to NicheNet"</h1>
                </div>
                <p class="auth-card__subtitle">"Connect with niche communities and build with AI."</p>
                {move || form_error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}
                <form class="auth-form" on:submit=on_submit>
                    <TextField
                        label="Email"
                        kind="email"
                        value=email
                        placeholder="your.email@university.edu"
                        error=Signal::derive(move || errors.get().email)
                        required=true
                    />
                    <TextField
                        label="Password"
                        kind="password"
                        value=password
                        error=Signal::derive(move || errors.get().password)
                        required=true
                    />
                    <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    <A href="/register">"Don't have an account? Sign up"</A>
                </p>
            </div>
        </div>
    }
}
