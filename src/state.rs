//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! host owns no data: it only carries the optional outbound clients and the
//! public origin used to build payment return URLs. A `None` client means the
//! feature answers in demo mode.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::services::stripe::StripeClient;

#[derive(Clone)]
pub struct AppState {
    pub llm: Option<Arc<dyn LlmChat>>,
    pub payments: Option<Arc<StripeClient>>,
    /// Origin the browser sees, e.g. `https://nichenet.app`.
    pub public_origin: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, payments: Option<Arc<StripeClient>>, public_origin: Option<String>) -> Self {
        Self { llm, payments, public_origin }
    }
}
