//! Dashboard: welcome banner, counters, and the member's communities and
//! recent posts.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. With a backend it refreshes the
//! community list and the joined communities' newest posts into the store on
//! mount; in demo mode the seeded store is shown as is.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::A;
use social::model::Post;
use social::page::{COMMUNITY_PAGE_SIZE, PageRequest};
use social::store::AppStore;

use crate::components::community_card::CommunityCard;
use crate::components::post_card::PostCard;
use crate::state::auth::AuthState;
use crate::util::env;

/// Posts shown in the overview and recent-activity tabs.
pub const RECENT_POSTS: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Overview,
    Communities,
    Recent,
}

impl DashboardTab {
    pub const ALL: [Self; 3] = [Self::Overview, Self::Communities, Self::Recent];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Communities => "My Communities",
            Self::Recent => "Recent Activity",
        }
    }
}

/// Newest posts from joined communities, paired with the community name.
pub fn recent_posts(store: &AppStore, limit: usize) -> Vec<(Post, String)> {
    store
        .feed_for_joined()
        .into_iter()
        .take(limit)
        .map(|p| {
            let name = store.community(&p.community_id).map(|c| c.name.clone()).unwrap_or_default();
            (p.clone(), name)
        })
        .collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let tab = RwSignal::new(DashboardTab::default());
    let error = RwSignal::new(None::<String>);

    if !env::is_demo() {
        leptos::task::spawn_local(async move {
            let loaded =
                crate::net::directory::load_communities(auth, store, PageRequest::first(COMMUNITY_PAGE_SIZE), "").await;
            match loaded {
                Ok(_) => crate::net::directory::load_joined_posts(auth, store).await,
                Err(e) => error.set(Some(e)),
            }
        });
    }

    let username = move || auth.get().user.map(|u| u.username).unwrap_or_default();
    let stats = move || store.with(AppStore::stats);
    let joined = move || store.with(|s| s.joined_communities().into_iter().cloned().collect::<Vec<_>>());
    let recent = move || store.with(|s| recent_posts(s, RECENT_POSTS));

    view! {
        <div class="page dashboard-page">
            <section class="welcome-banner">
                <h1>"Welcome back, " {username} "!"</h1>
                <p>"Ready to connect with your communities and explore new AI-powered startup ideas?"</p>
            </section>

            {move || error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}

            <section class="stat-grid">
                <div class="stat-card">
                    <span class="stat-card__label">"Communities Joined"</span>
                    <span class="stat-card__value">{move || stats().communities}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-card__label">"Posts Created"</span>
                    <span class="stat-card__value">{move || stats().posts}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-card__label">"AI Ideas Generated"</span>
                    <span class="stat-card__value">{move || stats().ideas}</span>
                </div>
            </section>

            <nav class="tabs">
                {DashboardTab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                class="tabs__tab"
                                class:tabs__tab--active=move || tab.get() == t
                                on:click=move |_| tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            {move || match tab.get() {
                DashboardTab::Overview => view! {
                    <div class="overview-grid">
                        <div class="panel">
                            <h3>"Quick Actions"</h3>
                            <div class="quick-actions">
                                <A href="/communities" attr:class="btn btn--primary">"Create New Post"</A>
                                <A href="/communities" attr:class="btn btn--secondary">"Discover Communities"</A>
                                <A href="/ai-assistant" attr:class="btn btn--accent">"Generate AI Idea"</A>
                            </div>
                        </div>
                        <div class="panel">
                            <h3>"Recent Activity"</h3>
                            <ul class="activity-list">
                                {recent()
                                    .into_iter()
                                    .map(|(post, community)| {
                                        view! {
                                            <li class="activity-list__item">
                                                <a href=format!("/posts/{}", post.id)>{post.title}</a>
                                                <span class="muted">"in " {community}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    </div>
                }
                .into_any(),
                DashboardTab::Communities => view! {
                    <div class="card-grid">
                        {joined()
                            .into_iter()
                            .map(|c| view! { <CommunityCard community=c/> })
                            .collect_view()}
                    </div>
                }
                .into_any(),
                DashboardTab::Recent => view! {
                    <div class="post-list">
                        {recent()
                            .into_iter()
                            .map(|(post, community)| view! { <PostCard post=post community_name=community/> })
                            .collect_view()}
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
