//! Header button for connecting an injected Ethereum wallet.

use leptos::prelude::*;
use social::wallet::WalletState;

use crate::util::env;

#[component]
pub fn WalletButton() -> impl IntoView {
    let wallet = RwSignal::new(WalletState::Disconnected);
    let config = env::wallet();
    let label = move || wallet.with(|w| w.label(&config));
    let connected = move || matches!(wallet.get(), WalletState::Connected { .. });
    let title = move || match wallet.get() {
        WalletState::Error(message) => message,
        WalletState::Connected { address, .. } => address,
        _ => String::new(),
    };

    let on_click = move |_| match wallet.get_untracked() {
        WalletState::Connecting => {}
        WalletState::Connected { .. } => wallet.set(WalletState::Disconnected),
        _ => {
            wallet.set(WalletState::Connecting);
            leptos::task::spawn_local(async move {
                let state = crate::net::wallet::connect().await;
                if let WalletState::Error(e) = &state {
                    leptos::logging::warn!("wallet connect failed: {e}");
                }
                wallet.set(state);
            });
        }
    };

    view! {
        <button
            class="btn btn--small wallet-button"
            class:wallet-button--connected=connected
            title=title
            disabled=move || wallet.get() == WalletState::Connecting
            on:click=on_click
        >
            <span class="wallet-button__dot"></span>
            {label}
        </button>
    }
}
