//! Chrome around every signed-in page: sidebar navigation and a header with
//! search, wallet and account controls.

#[cfg(test)]
#[path = "app_shell_test.rs"]
mod app_shell_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};
use social::store::AppStore;

use crate::components::wallet_button::WalletButton;
use crate::state::ai::AiState;
use crate::state::auth::AuthState;
use crate::state::payment::PaymentState;

/// Sidebar entries as `(href, label, icon)`.
pub const NAV_ITEMS: [(&str, &str, &str); 4] = [
    ("/", "Dashboard", "🏠"),
    ("/communities", "Communities", "👥"),
    ("/ai-assistant", "AI Assistant", "✨"),
    ("/profile", "Profile", "👤"),
];

/// Communities page URL for a header search, `None` for a blank query.
pub fn search_href(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| format!("/communities?q={}", urlencoding::encode(query)))
}

/// Whether a sidebar entry should be highlighted for `path`.
pub fn is_active(href: &str, path: &str) -> bool {
    if href == "/" { path == "/" } else { path == href || path.starts_with(&format!("{href}/")) }
}

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<RwSignal<AppStore>>();
    let ai = expect_context::<RwSignal<AiState>>();
    let payments = expect_context::<RwSignal<PaymentState>>();
    let navigate = use_navigate();
    let pathname = use_location().pathname;
    let query = RwSignal::new(String::new());

    let navigate_search = navigate.clone();
    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(href) = search_href(&query.get_untracked()) {
            navigate_search(&href, NavigateOptions::default());
        }
    };

    let on_sign_out = move |_| {
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            crate::net::session::sign_out(auth, store).await;
            ai.set(AiState::default());
            payments.set(PaymentState::default());
            navigate("/login", NavigateOptions { replace: true, ..NavigateOptions::default() });
        });
    };

    let username = move || auth.get().user.map(|u| u.username).unwrap_or_default();
    let initial = move || auth.get().user.map(|u| u.initial().to_string()).unwrap_or_default();

    view! {
        <div class="app-shell">
            <aside class="sidebar">
                <A href="/" attr:class="sidebar__brand">
                    <span class="logo-mark">"N"</span>
                    <span>"NicheNet"</span>
                </A>
                <nav class="sidebar__nav">
                    {NAV_ITEMS
                        .into_iter()
                        .map(|(href, label, icon)| {
                            let class = move || {
                                if is_active(href, &pathname.get()) {
                                    "sidebar__link sidebar__link--active"
                                } else {
                                    "sidebar__link"
                                }
                            };
                            view! {
                                <A href=href attr:class=class>
                                    <span class="sidebar__icon">{icon}</span>
                                    <span>{label}</span>
                                </A>
                            }
                        })
                        .collect_view()}
                </nav>
            </aside>

            <div class="app-shell__main">
                <header class="topbar">
                    <form class="topbar__search" on:submit=on_search>
                        <input
                            type="search"
                            placeholder="Search communities..."
                            prop:value=move || query.get()
                            on:input=move |ev| query.set(event_target_value(&ev))
                        />
                    </form>
                    <div class="topbar__actions">
                        <WalletButton />
                        <span class="user-badge" title=username>
                            <span class="avatar">{initial}</span>
                            <span class="user-badge__name">{username}</span>
                        </span>
                        <button class="btn btn--ghost btn--small" on:click=on_sign_out>"Sign out"</button>
                    </div>
                </header>
                <main class="app-shell__content">{children()}</main>
            </div>
        </div>
    }
}
