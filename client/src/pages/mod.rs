//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, pagination, realtime
//! subscriptions) and delegates rendering details to `components`. Pages check
//! `util::env::is_demo` and work against the local store when there is no
//! backend.

pub mod ai_assistant;
pub mod communities;
pub mod community_detail;
pub mod create_community;
pub mod create_post;
pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod payment_success;
pub mod post_detail;
pub mod profile;
pub mod register;
