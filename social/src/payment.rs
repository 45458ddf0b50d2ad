//! Payment session shapes, demo mode, and the premium gate.
//!
//! DESIGN
//! ======
//! The browser decides the mode from the presence of a publishable key.
//! In demo mode every call answers with the fixed values below and nothing
//! leaves the browser. In live mode the browser calls the host, which holds
//! the provider secret and creates hosted checkout sessions.
//!
//! The premium gate in front of the idea assistant is not an authorization
//! boundary: it ends unlocked whether or not the session call succeeded.

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::model::Transaction;
use crate::validate::{Validation, validate_payment_amount};

/// Price of unlocking the idea assistant, in cents.
pub const AI_ASSISTANT_PRICE_CENTS: i64 = 100;
pub const AI_ASSISTANT_FEATURE_ID: &str = "ai-assistant";
pub const DEFAULT_CURRENCY: &str = "usd";

pub const DEMO_SESSION_ID: &str = "demo-session-id";
pub const DEMO_CLIENT_SECRET: &str = "demo-client-secret";
pub const STATUS_SUCCEEDED: &str = "succeeded";

/// Return path the provider redirects to after checkout.
pub const SUCCESS_PATH: &str = "/payment-success";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentMode {
    Demo,
    Live,
}

impl PaymentMode {
    #[must_use]
    pub fn from_publishable_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some(k) if !k.is_empty() => Self::Live,
            _ => Self::Demo,
        }
    }
}

/// Body of `POST /api/create-payment-intent`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub feature_id: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_owned()
}

impl CreateSessionRequest {
    #[must_use]
    pub fn new(amount: i64, currency: &str, feature_id: &str) -> Self {
        Self { amount, currency: currency.to_owned(), feature_id: feature_id.to_owned() }
    }

    pub fn validate(&self) -> Validation {
        validate_payment_amount(Some(self.amount))
    }
}

/// A started checkout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Provider-hosted page to send the browser to (live mode only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[must_use]
pub fn demo_session() -> PaymentSession {
    PaymentSession {
        session_id: DEMO_SESSION_ID.to_owned(),
        client_secret: Some(DEMO_CLIENT_SECRET.to_owned()),
        url: None,
    }
}

/// Body of `GET /api/check-payment-status`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Body of `GET /api/payment-history`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub transactions: Vec<Transaction>,
}

/// Error body returned by the host's payment endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[must_use]
pub fn demo_history(now: OffsetDateTime) -> Vec<Transaction> {
    vec![
        Transaction {
            id: "demo-tx-1".to_owned(),
            amount: 500,
            currency: DEFAULT_CURRENCY.to_owned(),
            status: STATUS_SUCCEEDED.to_owned(),
            created: now,
            description: "Premium Community Access".to_owned(),
        },
        Transaction {
            id: "demo-tx-2".to_owned(),
            amount: 200,
            currency: DEFAULT_CURRENCY.to_owned(),
            status: STATUS_SUCCEEDED.to_owned(),
            created: now - Duration::days(1),
            description: "Advanced AI Idea Generation".to_owned(),
        },
    ]
}

/// Success URL handed to the provider; it substitutes the session id.
#[must_use]
pub fn success_url(origin: &str) -> String {
    format!("{}{SUCCESS_PATH}?session_id={{CHECKOUT_SESSION_ID}}", origin.trim_end_matches('/'))
}

#[must_use]
pub fn cancel_url(origin: &str) -> String {
    format!("{}/ai-assistant", origin.trim_end_matches('/'))
}

// =============================================================================
// RESULT PAGE
// =============================================================================

/// What the payment result page shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Processing,
    Succeeded,
    /// Provider reported some other status (e.g. `"processing"`, `"unpaid"`).
    Pending(String),
    Failed(String),
}

impl Verification {
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        match status {
            STATUS_SUCCEEDED | "paid" | "complete" => Self::Succeeded,
            "" => Self::Processing,
            other => Self::Pending(other.to_owned()),
        }
    }

    /// Verification for a result page opened without `?session_id=`.
    #[must_use]
    pub fn missing_session() -> Self {
        Self::Failed("Payment session ID not found".to_owned())
    }
}

// =============================================================================
// PREMIUM GATE
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PremiumGate {
    #[default]
    Locked,
    Unlocking,
    Unlocked,
}

impl PremiumGate {
    /// Start unlocking; returns `false` if a checkout is already running or
    /// the gate is open.
    pub fn begin(&mut self) -> bool {
        if *self == Self::Locked {
            *self = Self::Unlocking;
            true
        } else {
            false
        }
    }

    /// Finish the checkout. The gate opens on success and on failure.
    pub fn finish<E>(&mut self, _outcome: &Result<PaymentSession, E>) {
        *self = Self::Unlocked;
    }

    #[must_use]
    pub fn is_unlocked(self) -> bool {
        self == Self::Unlocked
    }
}
