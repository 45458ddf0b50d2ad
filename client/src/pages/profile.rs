//! Profile editing, activity counters and payment history.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use social::model::{ProfileUpdate, User};
use social::store::AppStore;
use social::validate::{validate_email, validate_username};

use crate::components::text_field::TextField;
use crate::state::auth::AuthState;
use crate::state::payment::PaymentState;

/// Split a comma separated interest list, dropping blanks and repeats.
pub fn parse_interests(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !out.iter().any(|seen| seen.eq_ignore_ascii_case(item)) {
            out.push(item.to_owned());
        }
    }
    out
}

/// Build the update from the edit form. Only changed fields are sent.
pub fn profile_changes(current: &User, username: &str, email: &str, bio: &str, interests: &str) -> Result<ProfileUpdate, String> {
    let username = username.trim();
    let email = email.trim();
    validate_username(username).map_err(str::to_owned)?;
    validate_email(email).map_err(str::to_owned)?;
    let interests = parse_interests(interests);
    Ok(ProfileUpdate {
        username: (username != current.username).then(|| username.to_owned()),
        email: (email != current.email).then(|| email.to_owned()),
        bio: (bio.trim() != current.bio).then(|| bio.trim().to_owned()),
        interests: (interests != current.interests).then_some(interests),
    })
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let payments = expect_context::<RwSignal<PaymentState>>();

    let editing = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let interests = RwSignal::new(String::new());

    let reset_form = move || {
        let user = auth.get_untracked().user.unwrap_or_default();
        username.set(user.username);
        email.set(user.email);
        bio.set(user.bio);
        interests.set(user.interests.join(", "));
    };

    Effect::new(move || {
        if payments.with_untracked(|p| p.loaded || p.loading) {
            return;
        }
        payments.update(|p| p.loading = true);
        leptos::task::spawn_local(async move {
            let result = crate::net::payments::history().await;
            payments.update(|p| {
                p.loading = false;
                p.loaded = true;
                match result {
                    Ok(history) => {
                        p.history = history;
                        p.error = None;
                    }
                    Err(e) => {
                        leptos::logging::warn!("payment history failed: {e}");
                        p.error = Some("Failed to load payment history".to_owned());
                    }
                }
            });
        });
    });

    let on_edit = move |_| {
        reset_form();
        error.set(None);
        editing.set(true);
    };

    let on_cancel = move |_| {
        error.set(None);
        editing.set(false);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let Some(current) = auth.get_untracked().user else {
            return;
        };
        let changes = match profile_changes(
            &current,
            &username.get_untracked(),
            &email.get_untracked(),
            &bio.get_untracked(),
            &interests.get_untracked(),
        ) {
            Ok(changes) => changes,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        if changes == ProfileUpdate::default() {
            editing.set(false);
            return;
        }
        busy.set(true);
        leptos::task::spawn_local(async move {
            match crate::net::session::update_profile(auth, store, changes).await {
                Ok(()) => {
                    error.set(None);
                    editing.set(false);
                }
                Err(e) => error.set(Some(e)),
            }
            busy.set(false);
        });
    };

    let user = move || auth.get().user.unwrap_or_default();
    let stats = move || store.with(AppStore::stats);

    view! {
        <div class="page profile-page">
            <header class="page-header">
                <h1>"Profile"</h1>
            </header>

            <section class="panel profile-card">
                <div class="profile-card__head">
                    <span class="avatar avatar--large">{move || user().initial().to_string()}</span>
                    <div>
                        <h2>{move || user().username}</h2>
                        <p class="muted">{move || user().email}</p>
                    </div>
                    <Show when=move || !editing.get()>
                        <button class="btn btn--secondary btn--small" on:click=on_edit>"Edit Profile"</button>
                    </Show>
                </div>

                {move || error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}

                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <div class="profile-card__body">
                            <p>{move || {
                                let bio = user().bio;
                                if bio.is_empty() { "No bio yet.".to_owned() } else { bio }
                            }}</p>
                            <div class="chips">
                                {move || user().interests.into_iter().map(|i| view! { <span class="chip">{i}</span> }).collect_view()}
                            </div>
                        </div>
                    }
                >
                    <form class="profile-form" on:submit=on_save>
                        <TextField label="Username" value=username required=true />
                        <TextField label="Email" kind="email" value=email required=true />
                        <TextField label="Bio" value=bio multiline=true rows=3 placeholder="Tell others about yourself" />
                        <TextField label="Interests" value=interests placeholder="AI, Climate Tech, Education" />
                        <div class="form-actions">
                            <button class="btn btn--ghost" type="button" on:click=on_cancel>"Cancel"</button>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Saving..." } else { "Save Changes" }}
                            </button>
                        </div>
                    </form>
                </Show>
            </section>

            <section class="stats-grid">
                <div class="stat">
                    <span class="stat__value">{move || stats().communities}</span>
                    <span class="stat__label">"Communities"</span>
                </div>
                <div class="stat">
                    <span class="stat__value">{move || stats().posts}</span>
                    <span class="stat__label">"Posts"</span>
                </div>
                <div class="stat">
                    <span class="stat__value">{move || stats().ideas}</span>
                    <span class="stat__label">"Ideas"</span>
                </div>
            </section>

            <section class="panel">
                <h2>"Payment History"</h2>
                {move || {
                    let state = payments.get();
                    if state.loading {
                        view! { <div class="page-spinner"><span class="spinner"></span></div> }.into_any()
                    } else if let Some(msg) = state.error.clone() {
                        view! { <div class="alert alert--error">{msg}</div> }.into_any()
                    } else if state.history.is_empty() {
                        view! { <p class="muted">"No payments yet."</p> }.into_any()
                    } else {
                        view! {
                            <table class="history">
                                <thead>
                                    <tr>
                                        <th>"Description"</th>
                                        <th>"Amount"</th>
                                        <th>"Date"</th>
                                        <th>"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {state
                                        .rows()
                                        .into_iter()
                                        .map(|row| {
                                            let class = format!("pill pill--{}", row.status);
                                            view! {
                                                <tr>
                                                    <td>{row.description}</td>
                                                    <td>{row.amount}</td>
                                                    <td>{row.date}</td>
                                                    <td><span class=class>{row.status}</span></td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_any()
                    }
                }}
            </section>
        </div>
    }
}
