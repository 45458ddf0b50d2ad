//! New post form for one community.

#[cfg(test)]
#[path = "create_post_test.rs"]
mod create_post_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use social::model::{Post, PostDraft};
use social::store::AppStore;
use social::validate::{validate_post_content, validate_post_title};

use crate::components::text_field::TextField;
use crate::state::auth::AuthState;
use crate::util::{clock, env};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostErrors {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

pub fn check_post(title: &str, content: &str) -> PostErrors {
    PostErrors {
        title: validate_post_title(title.trim()).err().map(str::to_owned),
        content: validate_post_content(content.trim()).err().map(str::to_owned),
    }
}

/// Create a post remotely (or in the store without a backend) and keep it
/// at the top of the local feed.
///
/// # Errors
///
/// A generic message after a backend failure, which is logged.
pub async fn submit_post(auth: RwSignal<AuthState>, store: RwSignal<AppStore>, draft: PostDraft) -> Result<Post, String> {
    if env::is_demo() {
        return store
            .try_update(|s| s.create_post(draft, clock::now()))
            .ok_or_else(|| "Store unavailable".to_owned());
    }
    let state = auth.get_untracked();
    let (Some(token), Some(user_id)) = (state.token(), state.user_id()) else {
        return Err("Sign in to post.".to_owned());
    };
    let mut post = supabase_create(token, user_id, draft).await?;
    if post.username.is_none() {
        post.username = state.user.as_ref().map(|u| u.username.clone());
    }
    store.update(|s| s.prepend_post(post.clone()));
    Ok(post)
}

async fn supabase_create(token: &str, user_id: &str, draft: PostDraft) -> Result<Post, String> {
    crate::net::supabase::create_post(token, user_id, draft, clock::now()).await.map_err(|e| {
        leptos::logging::warn!("failed to create post: {e}");
        "Failed to create post. Please try again.".to_owned()
    })
}

#[component]
pub fn CreatePostPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let params = use_params_map();
    let navigate = use_navigate();
    let community_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let errors = RwSignal::new(PostErrors::default());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let community_name = move || {
        let id = community_id.get();
        store.with(|s| s.community(&id).map(|c| c.name.clone())).unwrap_or_else(|| format!("Community #{id}"))
    };

    let cancel_navigate = navigate.clone();
    let on_cancel = move |_| {
        cancel_navigate(&format!("/communities/{}", community_id.get_untracked()), NavigateOptions::default());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let checked = check_post(&title.get_untracked(), &content.get_untracked());
        let ok = checked.is_empty();
        errors.set(checked);
        if !ok {
            return;
        }
        let draft = PostDraft {
            community_id: community_id.get_untracked(),
            title: title.get_untracked().trim().to_owned(),
            content: content.get_untracked().trim().to_owned(),
        };
        busy.set(true);
        form_error.set(None);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let back = format!("/communities/{}", draft.community_id);
            match submit_post(auth, store, draft).await {
                Ok(_) => navigate(&back, NavigateOptions::default()),
                Err(e) => form_error.set(Some(e)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="page form-page">
            <h1>"Create a New Post"</h1>
            <p class="muted">"in " {community_name}</p>
            {move || form_error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}
            <form class="form" on:submit=on_submit>
                <TextField
                    label="Title"
                    value=title
                    placeholder="Enter post title"
                    error=Signal::derive(move || errors.get().title)
                    required=true
                />
                <TextField
                    label="Content"
                    value=content
                    placeholder="Write your post content here..."
                    multiline=true
                    rows=8
                    error=Signal::derive(move || errors.get().content)
                    required=true
                />
                <div class="form__actions">
                    <button class="btn btn--secondary" type="button" on:click=on_cancel>"Cancel"</button>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating..." } else { "Create Post" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
