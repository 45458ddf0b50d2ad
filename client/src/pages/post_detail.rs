//! One post with its paginated comment thread and a reply form.
//!
//! With a backend, new comments (including the viewer's own) arrive through
//! the realtime subscription and are prepended. Without one, replies are
//! kept on the page only.

#[cfg(test)]
#[path = "post_detail_test.rs"]
mod post_detail_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use social::format::relative_time;
use social::model::{Comment, Post, User};
use social::page::{COMMENT_PAGE_SIZE, Feed, PageRequest};
use social::realtime::Subscription;
use social::store::AppStore;
use social::validate::validate_comment_content;
use time::OffsetDateTime;

use crate::components::text_field::TextField;
use crate::net::realtime::{self, RealtimeHandle};
use crate::net::supabase;
use crate::state::auth::AuthState;
use crate::util::{clock, env};

/// A reply held only in the page when there is no backend.
pub fn local_comment(post_id: &str, author: Option<&User>, content: &str, seq: u64, now: OffsetDateTime) -> Comment {
    Comment {
        id: format!("local-{seq}"),
        post_id: post_id.to_owned(),
        author_id: author.map(|u| u.id.clone()).unwrap_or_default(),
        username: author.map(|u| u.username.clone()),
        content: content.trim().to_owned(),
        created_at: now,
    }
}

#[component]
pub fn PostDetailPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let params = use_params_map();
    let post_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let post = RwSignal::new(None::<Post>);
    let comments = RwSignal::new(Feed::<Comment>::new(COMMENT_PAGE_SIZE));
    let loading = RwSignal::new(!env::is_demo());
    let error = RwSignal::new(None::<String>);
    let draft = RwSignal::new(String::new());
    let draft_error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);
    let local_seq = StoredValue::new(0_u64);
    let subscription = StoredValue::new(None::<RealtimeHandle>);

    Effect::new(move || {
        let id = post_id.get();
        if id.is_empty() {
            return;
        }
        if env::is_demo() {
            post.set(store.with_untracked(|s| s.post(&id).cloned()));
            comments.update(Feed::clear);
            return;
        }

        comments.update(Feed::clear);
        error.set(None);
        loading.set(true);
        let token = auth.get_untracked().token().map(str::to_owned);
        let thread_id = id.clone();
        leptos::task::spawn_local(async move {
            let request = PageRequest::first(COMMENT_PAGE_SIZE);
            match supabase::fetch_post_thread(token.as_deref(), &thread_id, request).await {
                Ok(thread) => {
                    post.set(Some(thread.post));
                    comments.update(|f| f.apply_page(request, thread.comments));
                }
                Err(e) => {
                    leptos::logging::warn!("failed to load post {thread_id}: {e}");
                    error.set(Some("Failed to load post. Please try again.".to_owned()));
                }
            }
            loading.set(false);
        });

        let handle = realtime::subscribe::<Comment, _>(
            Subscription::post_comments(&id),
            auth.get_untracked().token().map(str::to_owned),
            move |comment| comments.update(|f| f.push_live(comment)),
        );
        subscription.set_value(Some(handle));
    });

    on_cleanup(move || {
        if let Some(handle) = subscription.try_update_value(Option::take).flatten() {
            handle.unsubscribe();
        }
    });

    let load_more = move |_| {
        if loading.get_untracked() {
            return;
        }
        let request = comments.with_untracked(Feed::next_request);
        let id = post_id.get_untracked();
        loading.set(true);
        leptos::task::spawn_local(async move {
            let token = auth.get_untracked().token().map(str::to_owned);
            match supabase::fetch_comment_page(token.as_deref(), &id, request).await {
                Ok(page) => comments.update(|f| f.apply_page(request, page)),
                Err(e) => {
                    leptos::logging::warn!("failed to load comments: {e}");
                    error.set(Some("Failed to load post. Please try again.".to_owned()));
                }
            }
            loading.set(false);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let content = draft.get_untracked();
        if let Err(msg) = validate_comment_content(content.trim()) {
            draft_error.set(Some(msg.to_owned()));
            return;
        }
        draft_error.set(None);
        let id = post_id.get_untracked();

        if env::is_demo() {
            let seq = local_seq.get_value() + 1;
            local_seq.set_value(seq);
            let user = auth.get_untracked().user;
            let comment = local_comment(&id, user.as_ref(), &content, seq, clock::now());
            comments.update(|f| f.push_live(comment));
            draft.set(String::new());
            return;
        }

        let state = auth.get_untracked();
        let (Some(token), Some(user_id)) = (state.token().map(str::to_owned), state.user_id().map(str::to_owned)) else {
            draft_error.set(Some("Sign in to comment.".to_owned()));
            return;
        };
        submitting.set(true);
        leptos::task::spawn_local(async move {
            match supabase::add_comment(&token, &user_id, &id, content.trim(), clock::now()).await {
                Ok(_) => draft.set(String::new()),
                Err(e) => {
                    leptos::logging::warn!("failed to add comment: {e}");
                    draft_error.set(Some("Failed to submit comment. Please try again.".to_owned()));
                }
            }
            submitting.set(false);
        });
    };

    let render_post = move |p: Post| {
        let back = format!("/communities/{}", p.community_id);
        let when = relative_time(p.created_at, clock::now());
        view! {
            <article class="panel post-detail">
                <A href=back attr:class="back-link">"← Back to community"</A>
                <h1>{p.title.clone()}</h1>
                <div class="byline">
                    <span class="avatar">{p.author_initial().to_string()}</span>
                    <div>
                        <p class="byline__name">{p.author_label().to_owned()}</p>
                        <p class="muted">{when}</p>
                    </div>
                </div>
                <p class="post-detail__content">{p.content}</p>
            </article>
        }
    };

    view! {
        <div class="page post-detail-page">
            {move || error.get().map(|msg| view! {
                <div class="alert alert--error">
                    <p>{msg}</p>
                    <A href="/communities" attr:class="btn btn--secondary">"Back to Communities"</A>
                </div>
            })}
            {move || match post.get() {
                Some(p) => render_post(p).into_any(),
                None if loading.get() => view! { <div class="page-spinner"><div class="spinner"></div></div> }.into_any(),
                None => view! {
                    <div class="empty-state">
                        <h2>"Post not found"</h2>
                        <A href="/communities" attr:class="btn btn--secondary">"Back to Communities"</A>
                    </div>
                }
                .into_any(),
            }}

            <Show when=move || post.with(Option::is_some)>
                <section class="panel">
                    <h2>"Add a comment"</h2>
                    <form on:submit=on_submit>
                        <TextField
                            value=draft
                            placeholder="Share your thoughts..."
                            multiline=true
                            error=Signal::derive(move || draft_error.get())
                        />
                        <button class="btn btn--primary" type="submit" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Posting..." } else { "Post Comment" }}
                        </button>
                    </form>
                </section>

                <section class="comment-section">
                    <h2>{move || format!("Comments ({})", comments.with(Feed::total))}</h2>
                    <Show
                        when=move || !comments.with(Feed::is_empty)
                        fallback=|| view! {
                            <div class="empty-state">
                                <p class="muted">"No comments yet. Be the first to comment!"</p>
                            </div>
                        }
                    >
                        <div class="comment-list">
                            {move || {
                                comments
                                    .with(|f| f.items().to_vec())
                                    .into_iter()
                                    .map(|c| {
                                        let when = relative_time(c.created_at, clock::now());
                                        let initial = c.author_label().chars().next().map(|ch| ch.to_uppercase().to_string()).unwrap_or_default();
                                        view! {
                                            <div class="comment">
                                                <div class="byline">
                                                    <span class="avatar avatar--small">{initial}</span>
                                                    <div>
                                                        <p class="byline__name">{c.author_label().to_owned()}</p>
                                                        <p class="muted">{when}</p>
                                                    </div>
                                                </div>
                                                <p class="comment__content">{c.content}</p>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                    <Show when=move || comments.with(Feed::has_more)>
                        <div class="load-more">
                            <button class="btn btn--secondary" disabled=move || loading.get() on:click=load_more>
                                {move || if loading.get() { "Loading..." } else { "Load More Comments" }}
                            </button>
                        </div>
                    </Show>
                </section>
            </Show>
        </div>
    }
}
