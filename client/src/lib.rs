//! # client
//!
//! Leptos + WASM frontend for NicheNet.
//!
//! This crate contains pages, components, application state, and the browser
//! side of every external call: the hosted backend (REST and realtime), the
//! app host's AI and payment endpoints, and the injected wallet provider.
//! Domain rules live in the `social` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if util::env::is_demo() {
        log::warn!("backend not configured; running in demo mode");
    }
    leptos::mount::hydrate_body(app::App);
}
