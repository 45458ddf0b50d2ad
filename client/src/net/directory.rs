//! Community and feed loading shared by the dashboard and the community list.
//!
//! Membership is not part of the community row, so each fetched page is
//! followed by one membership lookup per community for a signed-in user.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use leptos::prelude::*;
use social::model::Community;
use social::page::{POST_PAGE_SIZE, Page, PageRequest};
use social::store::AppStore;

use super::supabase;
use crate::state::auth::AuthState;

/// Fetch one page of communities with membership flags filled in, and merge
/// it into the store.
///
/// # Errors
///
/// A generic message when the list itself failed. Membership lookups that
/// fail leave the flag unset and are only logged.
pub async fn load_communities(
    auth: RwSignal<AuthState>,
    store: RwSignal<AppStore>,
    request: PageRequest,
    search: &str,
) -> Result<Page<Community>, String> {
    let state = auth.get_untracked();
    let mut page = supabase::fetch_communities(state.token(), request, search).await.map_err(|e| {
        leptos::logging::warn!("failed to load communities: {e}");
        "Failed to load communities. Please try again.".to_owned()
    })?;

    let mut verified = Vec::new();
    if let (Some(token), Some(user_id)) = (state.token(), state.user_id()) {
        for community in &page.items {
            match supabase::is_member(token, user_id, &community.id).await {
                Ok(joined) => verified.push((community.id.clone(), joined)),
                Err(e) => leptos::logging::warn!("membership check for {} failed: {e}", community.id),
            }
        }
    }

    store.update(|s| merge_page(s, &mut page.items, &verified));
    Ok(page)
}

/// Upsert fetched communities. Flags from `verified` lookups win; the rest
/// keep whatever the store already knew, and `items` is updated to match.
pub fn merge_page(store: &mut AppStore, items: &mut [Community], verified: &[(String, bool)]) {
    for community in items.iter_mut() {
        store.upsert_community(community.clone());
        if let Some((_, joined)) = verified.iter().find(|(id, _)| *id == community.id) {
            store.set_membership(&community.id, *joined);
        }
        community.is_joined = store.community(&community.id).is_some_and(|c| c.is_joined);
    }
}

/// Pull the newest posts of every joined community into the store.
pub async fn load_joined_posts(auth: RwSignal<AuthState>, store: RwSignal<AppStore>) {
    let token = auth.get_untracked().token().map(str::to_owned);
    let joined: Vec<String> = store.with_untracked(|s| s.joined_communities().iter().map(|c| c.id.clone()).collect());
    for community_id in joined {
        match supabase::fetch_posts(token.as_deref(), &community_id, PageRequest::first(POST_PAGE_SIZE)).await {
            Ok(page) => store.update(|s| {
                for post in page.items.into_iter().rev() {
                    s.prepend_post(post);
                }
            }),
            Err(e) => leptos::logging::warn!("failed to load posts for {community_id}: {e}"),
        }
    }
}
