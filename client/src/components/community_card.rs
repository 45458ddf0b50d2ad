//! Card for one community with a join/leave toggle.

use leptos::prelude::*;
use social::format::format_number;
use social::model::Community;
use social::store::AppStore;

use crate::state::auth::AuthState;

#[component]
pub fn CommunityCard(community: Community) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let id = community.id.clone();
    // Live flag and count: the store may change after this card was built.
    let joined = {
        let id = id.clone();
        move || store.with(|s| s.community(&id).map_or(community.is_joined, |c| c.is_joined))
    };
    let members = {
        let id = id.clone();
        move || store.with(|s| s.community(&id).map_or(community.member_count, |c| c.member_count))
    };

    let on_toggle = {
        let id = id.clone();
        let joined = joined.clone();
        move |_| {
            if busy.get_untracked() {
                return;
            }
            let want = !joined();
            busy.set(true);
            error.set(None);
            let id = id.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::net::membership::set_joined(auth, store, id, want).await {
                    error.set(Some(e));
                }
                busy.set(false);
            });
        }
    };

    let href = format!("/communities/{id}");
    let joined_for_class = joined.clone();
    let joined_for_primary = joined.clone();
    let joined_for_label = joined;

    view! {
        <div class="community-card">
            <a class="community-card__body" href=href>
                <h3 class="community-card__name">{community.name}</h3>
                <p class="community-card__description">{community.description}</p>
                <div class="community-card__meta">
                    <span>{move || format!("{} members", format_number(u64::from(members())))}</span>
                    <span class="community-card__topic">{community.topic}</span>
                </div>
            </a>
            <button
                class="btn community-card__toggle"
                class:btn--secondary=move || joined_for_class()
                class:btn--primary=move || !joined_for_primary()
                disabled=move || busy.get()
                on:click=on_toggle
            >
                {move || if joined_for_label() { "Leave Community" } else { "Join Community" }}
            </button>
            {move || error.get().map(|msg| view! { <p class="community-card__error">{msg}</p> })}
        </div>
    }
}
