//! One community: header with membership controls and its paginated,
//! live-updating post feed.
//!
//! SYSTEM CONTEXT
//! ==============
//! With a backend, the first page is fetched when the route id changes and a
//! realtime subscription prepends posts inserted by anyone else. Fetch and
//! push are not reconciled, so a post can appear twice if both race.

#[cfg(test)]
#[path = "community_detail_test.rs"]
mod community_detail_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use social::format::format_number;
use social::model::{Community, Post};
use social::page::{Feed, POST_PAGE_SIZE, PageRequest};
use social::realtime::Subscription;
use social::store::AppStore;

use crate::components::post_card::PostCard;
use crate::net::realtime::{self, RealtimeHandle};
use crate::net::supabase;
use crate::state::auth::AuthState;
use crate::util::env;

pub fn membership_label(joined: bool, busy: bool) -> &'static str {
    match (joined, busy) {
        (true, true) => "Leaving...",
        (true, false) => "Leave Community",
        (false, true) => "Joining...",
        (false, false) => "Join Community",
    }
}

#[component]
pub fn CommunityDetailPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let params = use_params_map();
    let community_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let feed = RwSignal::new(Feed::<Post>::new(POST_PAGE_SIZE));
    let loading = RwSignal::new(!env::is_demo());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let subscription = StoredValue::new(None::<RealtimeHandle>);

    let load_page = move |id: String, request: PageRequest| {
        loading.set(true);
        leptos::task::spawn_local(async move {
            let token = auth.get_untracked().token().map(str::to_owned);
            match supabase::fetch_posts(token.as_deref(), &id, request).await {
                Ok(page) => feed.update(|f| f.apply_page(request, page)),
                Err(e) => {
                    leptos::logging::warn!("failed to load posts for {id}: {e}");
                    error.set(Some("Failed to load community. Please try again.".to_owned()));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move || {
        let id = community_id.get();
        if env::is_demo() || id.is_empty() {
            return;
        }
        feed.update(Feed::clear);
        error.set(None);

        let state = auth.get_untracked();
        let token = state.token().map(str::to_owned);
        let user_id = state.user_id().map(str::to_owned);
        let detail_id = id.clone();
        leptos::task::spawn_local(async move {
            match supabase::fetch_community(token.as_deref(), &detail_id).await {
                Ok(community) => store.update(|s| s.upsert_community(community)),
                Err(e) => {
                    leptos::logging::warn!("failed to load community {detail_id}: {e}");
                    error.set(Some("Failed to load community. Please try again.".to_owned()));
                    return;
                }
            }
            if let (Some(token), Some(user_id)) = (token, user_id) {
                match supabase::is_member(&token, &user_id, &detail_id).await {
                    Ok(joined) => store.update(|s| s.set_membership(&detail_id, joined)),
                    Err(e) => leptos::logging::warn!("membership check failed: {e}"),
                }
            }
        });
        load_page(id.clone(), PageRequest::first(POST_PAGE_SIZE));

        let handle = realtime::subscribe::<Post, _>(
            Subscription::community_posts(&id),
            auth.get_untracked().token().map(str::to_owned),
            move |post| feed.update(|f| f.push_live(post)),
        );
        subscription.set_value(Some(handle));
    });

    on_cleanup(move || {
        if let Some(handle) = subscription.try_update_value(Option::take).flatten() {
            handle.unsubscribe();
        }
    });

    let community = move || store.with(|s| s.community(&community_id.get()).cloned());
    let joined = move || community().is_some_and(|c| c.is_joined);
    let posts = move || {
        if env::is_demo() {
            store.with(|s| s.posts_in(&community_id.get()).into_iter().cloned().collect::<Vec<_>>())
        } else {
            feed.with(|f| f.items().to_vec())
        }
    };
    let has_more = move || !env::is_demo() && feed.with(Feed::has_more);

    let on_toggle = move |_| {
        if busy.get_untracked() {
            return;
        }
        let want = !joined();
        busy.set(true);
        let id = community_id.get_untracked();
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::membership::set_joined(auth, store, id, want).await {
                error.set(Some(e));
            }
            busy.set(false);
        });
    };

    let header = move |c: Community| {
        let create_href = format!("/communities/{}/posts/create", c.id);
        view! {
            <section class="community-header">
                <div>
                    <h1>{c.name}</h1>
                    <p class="muted">{c.description}</p>
                    <div class="community-header__meta">
                        <span class="pill">{c.topic}</span>
                        <span class="muted">{format!("{} members", format_number(u64::from(c.member_count)))}</span>
                    </div>
                </div>
                <div class="community-header__actions">
                    <Show when=joined>
                        <A href=create_href.clone() attr:class="btn btn--primary">"Create Post"</A>
                    </Show>
                    <button
                        class="btn"
                        class:btn--secondary=joined
                        class:btn--primary=move || !joined()
                        disabled=move || busy.get()
                        on:click=on_toggle
                    >
                        {move || membership_label(joined(), busy.get())}
                    </button>
                </div>
            </section>
        }
    };

    view! {
        <div class="page community-detail-page">
            {move || error.get().map(|msg| view! {
                <div class="alert alert--error">
                    <p>{msg}</p>
                    <A href="/communities" attr:class="btn btn--secondary">"Back to Communities"</A>
                </div>
            })}
            {move || match community() {
                Some(c) => header(c).into_any(),
                None if loading.get() => view! { <div class="page-spinner"><div class="spinner"></div></div> }.into_any(),
                None => view! {
                    <div class="empty-state">
                        <h2>"Community not found"</h2>
                        <A href="/communities" attr:class="btn btn--secondary">"Back to Communities"</A>
                    </div>
                }
                .into_any(),
            }}

            <section class="post-section">
                <h2>"Posts"</h2>
                <Show
                    when=move || !posts().is_empty()
                    fallback=move || view! {
                        <div class="empty-state">
                            <p class="muted">"No posts yet in this community."</p>
                            <Show when=joined>
                                <A
                                    href=move || format!("/communities/{}/posts/create", community_id.get())
                                    attr:class="btn btn--primary"
                                >
                                    "Create the first post"
                                </A>
                            </Show>
                        </div>
                    }
                >
                    <div class="post-list">
                        {move || posts().into_iter().map(|p| view! { <PostCard post=p/> }).collect_view()}
                    </div>
                </Show>
                <Show when=has_more>
                    <div class="load-more">
                        <button
                            class="btn btn--secondary"
                            disabled=move || loading.get()
                            on:click=move |_| {
                                load_page(community_id.get_untracked(), feed.with_untracked(Feed::next_request));
                            }
                        >
                            {move || if loading.get() { "Loading..." } else { "Load More Posts" }}
                        </button>
                    </div>
                </Show>
            </section>
        </div>
    }
}
