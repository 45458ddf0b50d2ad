//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the app chrome, cards, and form fields while reading and
//! writing shared state from Leptos context providers.

pub mod ai_button;
pub mod app_shell;
pub mod community_card;
pub mod post_card;
pub mod text_field;
pub mod wallet_button;
