//! Community directory: search, topic filter, load-more, and a quick
//! create-post dialog for joined communities.

#[cfg(test)]
#[path = "communities_test.rs"]
mod communities_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;
use social::model::{Community, PostDraft};
use social::page::{COMMUNITY_PAGE_SIZE, Feed, PageRequest};
use social::store::AppStore;
use social::validate::{validate_post_content, validate_post_title};

use crate::components::community_card::CommunityCard;
use crate::components::post_card::PostCard;
use crate::components::text_field::TextField;
use crate::state::auth::AuthState;
use crate::util::{clock, env};

/// Value of the topic selector that disables the filter.
pub const ALL_TOPICS: &str = "all";

/// Topic options for the selector: "all" first, then each topic once.
pub fn topic_options(communities: &[Community]) -> Vec<String> {
    let mut out = vec![ALL_TOPICS.to_owned()];
    for c in communities {
        if !c.topic.is_empty() && !out.contains(&c.topic) {
            out.push(c.topic.clone());
        }
    }
    out
}

/// Client-side topic filter applied on top of the server search.
pub fn filter_by_topic(communities: &[Community], topic: &str) -> Vec<Community> {
    communities
        .iter()
        .filter(|c| topic == ALL_TOPICS || c.topic == topic)
        .cloned()
        .collect()
}

/// Checks for the quick-post dialog.
///
/// # Errors
///
/// The first failing field's message.
pub fn check_quick_post(draft: &PostDraft) -> Result<(), &'static str> {
    if draft.community_id.is_empty() {
        return Err("Select a community");
    }
    validate_post_title(draft.title.trim())?;
    validate_post_content(draft.content.trim())
}

#[component]
pub fn CommunitiesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let query = use_query_map();
    let navigate = use_navigate();

    let search = RwSignal::new(query.read_untracked().get("q").unwrap_or_default());
    let topic = RwSignal::new(ALL_TOPICS.to_owned());
    let feed = RwSignal::new(Feed::<Community>::new(COMMUNITY_PAGE_SIZE));
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    // The header search box navigates here with `?q=`.
    Effect::new(move || {
        let q = query.read().get("q").unwrap_or_default();
        if q != search.get_untracked() {
            search.set(q);
        }
    });

    let load_page = move |request: PageRequest| {
        if env::is_demo() || loading.get_untracked() {
            return;
        }
        loading.set(true);
        let term = search.get_untracked();
        leptos::task::spawn_local(async move {
            match crate::net::directory::load_communities(auth, store, request, &term).await {
                Ok(page) => {
                    feed.update(|f| f.apply_page(request, page));
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
            loading.set(false);
        });
    };

    // Server search: page 1 again whenever the term changes.
    Effect::new(move || {
        search.track();
        load_page(PageRequest::first(COMMUNITY_PAGE_SIZE));
    });

    let all_communities = move || {
        if env::is_demo() {
            store.with(|s| s.filter_communities(&search.get(), None).into_iter().cloned().collect::<Vec<_>>())
        } else {
            feed.with(|f| f.items().to_vec())
        }
    };
    let visible = move || filter_by_topic(&all_communities(), &topic.get());
    let topics = move || {
        if env::is_demo() {
            store.with(|s| topic_options(&s.communities))
        } else {
            feed.with(|f| topic_options(f.items()))
        }
    };
    let joined = move || store.with(|s| s.joined_communities().into_iter().cloned().collect::<Vec<_>>());
    let joined_posts = move || {
        store.with(|s| {
            s.feed_for_joined()
                .into_iter()
                .map(|p| {
                    let name = s.community(&p.community_id).map(|c| c.name.clone()).unwrap_or_default();
                    (p.clone(), name)
                })
                .collect::<Vec<_>>()
        })
    };

    // Quick-post dialog.
    let dialog_open = RwSignal::new(false);
    let draft_community = RwSignal::new(String::new());
    let draft_title = RwSignal::new(String::new());
    let draft_content = RwSignal::new(String::new());
    let dialog_error = RwSignal::new(None::<String>);
    let posting = RwSignal::new(false);

    let close_dialog = move || {
        dialog_open.set(false);
        draft_community.set(String::new());
        draft_title.set(String::new());
        draft_content.set(String::new());
        dialog_error.set(None);
    };

    let on_post = move |_| {
        if posting.get_untracked() {
            return;
        }
        let draft = PostDraft {
            community_id: draft_community.get_untracked(),
            title: draft_title.get_untracked().trim().to_owned(),
            content: draft_content.get_untracked().trim().to_owned(),
        };
        if let Err(msg) = check_quick_post(&draft) {
            dialog_error.set(Some(msg.to_owned()));
            return;
        }
        posting.set(true);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match crate::pages::create_post::submit_post(auth, store, draft).await {
                Ok(post) => {
                    close_dialog();
                    if !env::is_demo() {
                        navigate(&format!("/posts/{}", post.id), NavigateOptions::default());
                    }
                }
                Err(e) => dialog_error.set(Some(e)),
            }
            posting.set(false);
        });
    };

    view! {
        <div class="page communities-page">
            <header class="page-header">
                <div>
                    <h1>"Communities"</h1>
                    <p class="muted">"Discover and join niche communities that match your interests"</p>
                </div>
                <div class="page-header__actions">
                    <A href="/communities/create" attr:class="btn btn--secondary">"New Community"</A>
                    <button
                        class="btn btn--primary"
                        disabled=move || joined().is_empty()
                        on:click=move |_| dialog_open.set(true)
                    >
                        "+ Create Post"
                    </button>
                </div>
            </header>

            <div class="filter-bar">
                <input
                    class="filter-bar__search"
                    type="search"
                    placeholder="Search communities..."
                    prop:value=move || search.get()
                    on:change=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    class="filter-bar__topic"
                    prop:value=move || topic.get()
                    on:change=move |ev| topic.set(event_target_value(&ev))
                >
                    {move || {
                        topics()
                            .into_iter()
                            .map(|t| {
                                let label = if t == ALL_TOPICS { "All Topics".to_owned() } else { t.clone() };
                                view! { <option value=t>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            {move || error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}

            <section>
                <h2>{move || format!("All Communities ({})", visible().len())}</h2>
                <div class="card-grid">
                    {move || visible().into_iter().map(|c| view! { <CommunityCard community=c/> }).collect_view()}
                </div>
                <Show when=move || !env::is_demo() && feed.with(Feed::has_more)>
                    <div class="load-more">
                        <button
                            class="btn btn--secondary"
                            disabled=move || loading.get()
                            on:click=move |_| load_page(feed.with_untracked(Feed::next_request))
                        >
                            {move || if loading.get() { "Loading..." } else { "Load More Communities" }}
                        </button>
                    </div>
                </Show>
            </section>

            <Show when=move || !joined_posts().is_empty()>
                <section>
                    <h2>"Recent Posts"</h2>
                    <div class="post-list">
                        {move || {
                            joined_posts()
                                .into_iter()
                                .map(|(post, name)| view! { <PostCard post=post community_name=name/> })
                                .collect_view()
                        }}
                    </div>
                </section>
            </Show>

            <Show when=move || dialog_open.get()>
                <div class="dialog-backdrop" on:click=move |_| close_dialog()>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Create New Post"</h2>
                        <div class="field">
                            <label class="field__label">"Community"</label>
                            <select
                                class="field__control"
                                prop:value=move || draft_community.get()
                                on:change=move |ev| draft_community.set(event_target_value(&ev))
                            >
                                <option value="">"Select a community"</option>
                                {move || {
                                    joined()
                                        .into_iter()
                                        .map(|c| view! { <option value=c.id>{c.name}</option> })
                                        .collect_view()
                                }}
                            </select>
                        </div>
                        <TextField label="Title" value=draft_title placeholder="Enter post title..."/>
                        <TextField
                            label="Content"
                            value=draft_content
                            placeholder="What would you like to share..."
                            multiline=true
                        />
                        {move || dialog_error.get().map(|msg| view! { <p class="field__error">{msg}</p> })}
                        <div class="dialog__actions">
                            <button class="btn btn--secondary" on:click=move |_| close_dialog()>"Cancel"</button>
                            <button class="btn btn--primary" disabled=move || posting.get() on:click=on_post.clone()>
                                {move || if posting.get() { "Posting..." } else { "Post" }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
