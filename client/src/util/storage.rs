//! Browser localStorage helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The signed-in session survives reloads through these helpers. They are
//! no-ops during server rendering.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Hosted-backend session (`social::model::Session`).
pub const SESSION_KEY: &str = "nichenet.session";
/// Demo-mode user, kept so a reload stays signed in without a backend.
pub const DEMO_USER_KEY: &str = "nichenet.demo_user";
/// Set once the assistant's premium gate has opened, so a checkout redirect
/// comes back unlocked.
pub const PREMIUM_KEY: &str = "nichenet.premium";

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = local_storage()?;
        let raw = storage.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}
