//! New community form. The creator joins the community it creates.

#[cfg(test)]
#[path = "create_community_test.rs"]
mod create_community_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use social::model::{Community, CommunityDraft};
use social::store::AppStore;
use social::validate::validate_community_name;

use crate::components::text_field::TextField;
use crate::state::auth::AuthState;
use crate::util::{clock, env};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommunityErrors {
    pub name: Option<String>,
    pub description: Option<String>,
    pub topic: Option<String>,
}

impl CommunityErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.topic.is_none()
    }
}

pub fn check_community(draft: &CommunityDraft) -> CommunityErrors {
    let required = |value: &str, msg: &str| value.trim().is_empty().then(|| msg.to_owned());
    CommunityErrors {
        name: validate_community_name(draft.name.trim()).err().map(str::to_owned),
        description: required(&draft.description, "Description is required"),
        topic: required(&draft.topic, "Topic is required"),
    }
}

async fn create(auth: RwSignal<AuthState>, store: RwSignal<AppStore>, draft: CommunityDraft) -> Result<Community, String> {
    if env::is_demo() {
        return store
            .try_update(|s| s.create_community(draft, clock::now()))
            .ok_or_else(|| "Store unavailable".to_owned());
    }
    let state = auth.get_untracked();
    let (Some(token), Some(user_id)) = (state.token(), state.user_id()) else {
        return Err("Sign in to create a community.".to_owned());
    };
    let community = crate::net::supabase::create_community(token, user_id, draft, clock::now())
        .await
        .map_err(|e| {
            leptos::logging::warn!("failed to create community: {e}");
            "Failed to create community. Please try again.".to_owned()
        })?;
    store.update(|s| s.upsert_community(community.clone()));
    Ok(community)
}

#[component]
pub fn CreateCommunityPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let topic = RwSignal::new(String::new());
    let errors = RwSignal::new(CommunityErrors::default());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let cancel_navigate = navigate.clone();
    let on_cancel = move |_| cancel_navigate("/communities", NavigateOptions::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let draft = CommunityDraft {
            name: name.get_untracked().trim().to_owned(),
            description: description.get_untracked().trim().to_owned(),
            topic: topic.get_untracked().trim().to_owned(),
        };
        let checked = check_community(&draft);
        let ok = checked.is_empty();
        errors.set(checked);
        if !ok {
            return;
        }
        busy.set(true);
        form_error.set(None);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match create(auth, store, draft).await {
                Ok(community) => navigate(&format!("/communities/{}", community.id), NavigateOptions::default()),
                Err(e) => form_error.set(Some(e)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="page form-page">
            <h1>"Create a New Community"</h1>
            {move || form_error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}
            <form class="form" on:submit=on_submit>
                <TextField
                    label="Community Name"
                    value=name
                    placeholder="Enter community name"
                    error=Signal::derive(move || errors.get().name)
                    required=true
                />
                <TextField
                    label="Description"
                    value=description
                    placeholder="Describe your community"
                    multiline=true
                    error=Signal::derive(move || errors.get().description)
                    required=true
                />
                <TextField
                    label="Topic"
                    value=topic
                    placeholder="e.g. AI Ethics, Web3, Programming"
                    error=Signal::derive(move || errors.get().topic)
                    required=true
                />
                <div class="form__actions">
                    <button class="btn btn--secondary" type="button" on:click=on_cancel>"Cancel"</button>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating..." } else { "Create Community" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
