//! Join and leave, optimistic in the store and confirmed by the backend.

use leptos::prelude::*;
use social::store::AppStore;

use super::supabase;
use crate::state::auth::AuthState;
use crate::util::{clock, env};

/// Set the membership flag for `community_id`.
///
/// The store changes first so the card updates immediately; a backend
/// failure rolls it back. Repeating the current state is a no-op.
///
/// # Errors
///
/// The backend's message when the remote change failed.
pub async fn set_joined(
    auth: RwSignal<AuthState>,
    store: RwSignal<AppStore>,
    community_id: String,
    join: bool,
) -> Result<(), String> {
    let changed = store.try_update(|s| apply(s, &community_id, join)).unwrap_or(false);
    if !changed || env::is_demo() {
        return Ok(());
    }

    let state = auth.get_untracked();
    let result = match (state.token(), state.user_id()) {
        (Some(token), Some(user_id)) if join => {
            supabase::join_community(token, user_id, &community_id, clock::now()).await
        }
        (Some(token), Some(user_id)) => supabase::leave_community(token, user_id, &community_id).await,
        _ => Err(social::ApiError::NotConfigured),
    };
    if let Err(e) = result {
        leptos::logging::warn!("membership change for {community_id} failed: {e}");
        store.try_update(|s| apply(s, &community_id, !join));
        let verb = if join { "join" } else { "leave" };
        return Err(format!("Failed to {verb} community. Please try again."));
    }
    Ok(())
}

fn apply(store: &mut AppStore, community_id: &str, join: bool) -> bool {
    if join { store.join_community(community_id) } else { store.leave_community(community_id) }
}
