//! Idea assistant behind the premium gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Unlocking starts a checkout session; success and failure both open the
//! gate. With a live payment provider a successful session then redirects to
//! the hosted checkout, so the open gate is remembered in `localStorage`.
//! Generation and collaborator search go through the app host.

#[cfg(test)]
#[path = "ai_assistant_test.rs"]
mod ai_assistant_test;

use leptos::prelude::*;
use social::format::format_short_date;
use social::ideas::DEFAULT_SKILLS;
use social::model::{AiIdea, IdeaDraft};
use social::payment::{AI_ASSISTANT_FEATURE_ID, AI_ASSISTANT_PRICE_CENTS, CreateSessionRequest, DEFAULT_CURRENCY, PremiumGate};
use social::store::AppStore;

use crate::components::ai_button::{AiAction, AiButton};
use crate::components::text_field::TextField;
use crate::state::ai::AiState;
use crate::state::auth::AuthState;
use crate::util::{clock, env, storage};

pub fn unlock_request() -> CreateSessionRequest {
    CreateSessionRequest::new(AI_ASSISTANT_PRICE_CENTS, DEFAULT_CURRENCY, AI_ASSISTANT_FEATURE_ID)
}

pub fn default_skills() -> Vec<String> {
    DEFAULT_SKILLS.iter().map(|s| (*s).to_owned()).collect()
}

async fn unlock(ai: RwSignal<AiState>) {
    let outcome = crate::net::payments::create_session(&unlock_request()).await;
    if let Err(e) = &outcome {
        leptos::logging::warn!("checkout failed, opening assistant anyway: {e}");
    }
    ai.update(|s| s.gate.finish(&outcome));
    storage::save_json(storage::PREMIUM_KEY, &true);
    if let Ok(session) = &outcome {
        if let Err(e) = crate::net::payments::process_payment(session) {
            leptos::logging::warn!("checkout redirect failed: {e}");
        }
    }
}

async fn save(auth: RwSignal<AuthState>, store: RwSignal<AppStore>, draft: IdeaDraft) -> Result<AiIdea, String> {
    if env::is_demo() {
        return store
            .try_update(|s| s.save_idea(&draft, clock::now()))
            .ok_or_else(|| "Store unavailable".to_owned());
    }
    let state = auth.get_untracked();
    let (Some(token), Some(user_id)) = (state.token(), state.user_id()) else {
        return Err("Sign in to save ideas.".to_owned());
    };
    let idea = crate::net::supabase::save_idea(token, user_id, &draft, clock::now()).await.map_err(|e| {
        leptos::logging::warn!("failed to save idea: {e}");
        "Failed to save idea. Please try again.".to_owned()
    })?;
    store.update(|s| s.ideas.insert(0, idea.clone()));
    Ok(idea)
}

#[component]
pub fn AiAssistantPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let ai = expect_context::<RwSignal<AiState>>();
    let save_error = RwSignal::new(None::<String>);

    Effect::new(move || {
        if storage::load_json::<bool>(storage::PREMIUM_KEY).unwrap_or(false) {
            ai.update(|s| s.gate = PremiumGate::Unlocked);
        }
    });

    let input = RwSignal::new(ai.get_untracked().input);
    Effect::new(move || {
        let text = input.get();
        ai.update(|s| s.input = text);
    });

    let interests = move || auth.get().user.map(|u| u.interests).unwrap_or_default();
    let busy = Signal::derive(move || ai.get().loading);
    let unlocking = move || ai.get().gate == PremiumGate::Unlocking;

    let on_unlock = move |_| {
        let started = ai.try_update(|s| s.gate.begin()).unwrap_or(false);
        if started {
            leptos::task::spawn_local(unlock(ai));
        }
    };

    let on_generate = Callback::new(move |()| {
        if !ai.get_untracked().can_generate() {
            return;
        }
        ai.update(|s| s.loading = true);
        let text = input.get_untracked();
        let interests = interests();
        leptos::task::spawn_local(async move {
            let idea = crate::net::ai::generate_idea(&text, &interests).await;
            ai.update(|s| s.show_idea(idea));
        });
    });

    let on_collaborators = Callback::new(move |()| {
        let state = ai.get_untracked();
        if !state.can_find_collaborators() {
            return;
        }
        let Some(idea) = state.idea else {
            return;
        };
        ai.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            let found = crate::net::ai::find_collaborators(&idea.description, &default_skills()).await;
            ai.update(|s| {
                s.collaborators = found;
                s.loading = false;
            });
        });
    });

    let on_save = move |_| {
        let Some(draft) = ai.get_untracked().idea else {
            return;
        };
        save_error.set(None);
        leptos::task::spawn_local(async move {
            match save(auth, store, draft).await {
                Ok(_) => ai.update(|s| s.saved = true),
                Err(e) => save_error.set(Some(e)),
            }
        });
    };

    let locked_view = move || {
        view! {
            <div class="page ai-page">
                <div class="panel premium-gate">
                    <div class="premium-gate__icon">"🔒"</div>
                    <h2>"Premium AI Assistant"</h2>
                    <p class="muted">
                        "Access advanced AI features for idea generation and collaboration matching. "
                        "Unlock your startup potential with AI-powered insights."
                    </p>
                    <div class="premium-gate__perks">
                        <h3>"What you get:"</h3>
                        <ul>
                            <li>"AI-powered business idea generation"</li>
                            <li>"Personalized collaboration recommendations"</li>
                            <li>"Idea validation and refinement tools"</li>
                            <li>"Market analysis and competitive insights"</li>
                        </ul>
                    </div>
                    <button class="btn btn--primary" disabled=unlocking on:click=on_unlock>
                        {move || if unlocking() { "Starting checkout..." } else { "Unlock AI Assistant" }}
                    </button>
                </div>
            </div>
        }
    };

    let idea_view = move |idea: IdeaDraft| {
        view! {
            <div class="idea">
                <h3>{idea.title}</h3>
                <p class="muted">{idea.description}</p>
                <h4>"Target Market"</h4>
                <p class="muted">{idea.target_market}</p>
                <h4>"Key Features"</h4>
                <ul>{idea.features.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}</ul>
                <h4>"Challenges"</h4>
                <p class="muted">{idea.challenges}</p>
                <h4>"Next Steps"</h4>
                <p class="muted">{idea.next_steps}</p>
                <div class="idea__actions">
                    <button class="btn btn--secondary btn--small" disabled=move || ai.get().saved on:click=on_save>
                        {move || if ai.get().saved { "Saved" } else { "Save Idea" }}
                    </button>
                    <AiButton
                        action=AiAction::FindCollaborators
                        disabled=Signal::derive(move || !ai.get().can_find_collaborators())
                        busy=busy
                        on_click=on_collaborators
                    />
                </div>
                {move || save_error.get().map(|msg| view! { <p class="field__error">{msg}</p> })}
            </div>
        }
    };

    let unlocked_view = move || {
        view! {
            <div class="page ai-page">
                <header class="page-header page-header--centered">
                    <h1>"AI Startup Assistant"</h1>
                    <p class="muted">
                        "Leverage AI to generate innovative startup ideas, validate concepts, and find the perfect collaborators"
                    </p>
                </header>

                <div class="two-column">
                    <section class="panel">
                        <h2>"🧠 Generate Ideas"</h2>
                        <TextField
                            label="Describe your vision or problem area"
                            value=input
                            placeholder="e.g., AI-powered study tools for students"
                        />
                        <AiButton
                            action=AiAction::GenerateIdea
                            disabled=Signal::derive(move || !ai.get().can_generate())
                            busy=busy
                            on_click=on_generate
                        />
                        <h3 class="muted">"Your Interests"</h3>
                        <div class="chips">
                            {move || interests().into_iter().map(|i| view! { <span class="chip">{i}</span> }).collect_view()}
                        </div>
                    </section>

                    <section class="panel">
                        <h2>"💡 Generated Idea"</h2>
                        {move || match ai.get().idea {
                            Some(idea) => idea_view(idea).into_any(),
                            None => view! {
                                <div class="empty-state">
                                    <p class="muted">"Your AI-generated idea will appear here"</p>
                                </div>
                            }
                            .into_any(),
                        }}
                    </section>
                </div>

                <Show when=move || !ai.get().collaborators.is_empty()>
                    <section class="panel">
                        <h2>"👥 Suggested Collaborators"</h2>
                        <div class="card-grid card-grid--two">
                            {move || {
                                ai.get()
                                    .collaborators
                                    .into_iter()
                                    .map(|c| view! {
                                        <div class="collaborator">
                                            <h3>{c.role}</h3>
                                            <p><span class="muted">"Skills: "</span>{c.skills.join(", ")}</p>
                                            <p><span class="muted">"Responsibilities: "</span>{c.responsibilities}</p>
                                            <p><span class="muted">"Why important: "</span>{c.importance}</p>
                                        </div>
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </section>
                </Show>

                <Show when=move || store.with(|s| !s.ideas.is_empty())>
                    <section class="panel">
                        <h2>"Your Saved Ideas"</h2>
                        <div class="saved-ideas">
                            {move || {
                                store
                                    .with(|s| s.ideas.clone())
                                    .into_iter()
                                    .map(|idea| view! {
                                        <div class="saved-idea">
                                            <p class="saved-idea__title">{idea.title}</p>
                                            <p>{idea.description}</p>
                                            <div class="saved-idea__meta">
                                                <span class="muted">{format_short_date(idea.created_at)}</span>
                                                <span class="pill">{idea.validation_status.as_str()}</span>
                                            </div>
                                        </div>
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </section>
                </Show>
            </div>
        }
    };

    view! {
        {move || if ai.get().gate.is_unlocked() { unlocked_view().into_any() } else { locked_view().into_any() }}
    }
}
