//! Account sign-up.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use social::store::AppStore;
use social::validate::{validate_email, validate_password, validate_password_confirmation, validate_username};

use crate::components::text_field::TextField;
use crate::net::session::Registered;
use crate::state::auth::AuthState;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterErrors {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm: Option<String>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none() && self.confirm.is_none()
    }
}

pub fn check_register(form: &RegisterForm) -> RegisterErrors {
    let msg = |r: Result<(), &'static str>| r.err().map(str::to_owned);
    RegisterErrors {
        username: msg(validate_username(form.username.trim())),
        email: msg(validate_email(form.email.trim())),
        password: msg(validate_password(&form.password)),
        confirm: msg(validate_password_confirmation(&form.password, &form.confirm)),
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(RegisterErrors::default());
    let form_error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

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
        let form = RegisterForm {
            username: username.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
            confirm: confirm.get_untracked(),
        };
        let checked = check_register(&form);
        let ok = checked.is_empty();
        errors.set(checked);
        if !ok {
            return;
        }
        busy.set(true);
        form_error.set(None);
        notice.set(None);
        leptos::task::spawn_local(async move {
            match crate::net::session::register(auth, store, &form.username, &form.email, &form.password).await {
                Ok(Registered::SignedIn) => {}
                Ok(Registered::ConfirmEmail) => {
                    notice.set(Some("Check your email to confirm your account, then sign in.".to_owned()));
                }
                Err(e) => form_error.set(Some(e)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-card__brand">
                    <span class="logo-mark">"N"</span>
                    <h1>"Create your account"</h1>
                </div>
                {move || form_error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}
                {move || notice.get().map(|msg| view! { <div class="alert alert--info">{msg}</div> })}
                <form class="auth-form" on:submit=on_submit>
                    <TextField
                        label="Username"
                        value=username
                        placeholder="student_builder"
                        error=Signal::derive(move || errors.get().username)
                        required=true
                    />
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
                    <TextField
                        label="Confirm password"
                        kind="password"
                        value=confirm
                        error=Signal::derive(move || errors.get().confirm)
                        required=true
                    />
                    <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    <A href="/login">"Already have an account? Sign in"</A>
                </p>
            </div>
        </div>
    }
}
