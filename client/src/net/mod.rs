//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` sends prepared requests to the hosted backend and `supabase`
//! wraps the individual operations. `directory` combines them into list
//! loads and `membership` keeps join/leave in step with the store.
//! `realtime` manages the change-feed WebSocket. `ai` and `payments` call the
//! app host. `wallet` talks to the injected browser wallet. `session` ties
//! sign-in to local storage and the root contexts.

pub mod ai;
pub mod backend;
pub mod directory;
pub mod membership;
pub mod payments;
pub mod realtime;
pub mod session;
pub mod supabase;
pub mod wallet;
