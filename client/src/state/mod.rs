//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `ai`, `payment`) so components depend on
//! small focused models. Community, post, and idea data lives in the injected
//! `social::store::AppStore`.

pub mod ai;
pub mod auth;
pub mod payment;
