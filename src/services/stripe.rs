//! Payment provider passthrough.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser never sees the provider secret. It asks the host to start a
//! hosted checkout session, is redirected to the provider's page, and lands
//! back on `/payment-success?session_id=..`, where it asks the host for the
//! session status. History lists the account's recent payment intents.
//!
//! The provider API takes form-encoded bodies and answers JSON.

use std::time::Duration;

use serde_json::Value;
use social::model::Transaction;
use social::payment::{CreateSessionRequest, PaymentSession, STATUS_SUCCEEDED, cancel_url, success_url};
use time::OffsetDateTime;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const HISTORY_LIMIT: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment provider not configured: env var {var} not set")]
    NotConfigured { var: String },

    #[error("invalid payment request: {0}")]
    InvalidRequest(String),

    #[error("payment request failed: {0}")]
    Request(String),

    /// The provider rejected the call; `message` is its own explanation.
    #[error("payment provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("payment response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
}

impl StripeConfig {
    /// Read `STRIPE_SECRET_KEY_ENV` (names the variable holding the secret key)
    /// and optional `STRIPE_API_BASE`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NotConfigured`] when either variable is absent.
    pub fn from_env() -> Result<Self, PaymentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns [`PaymentError::NotConfigured`] when either variable is absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PaymentError> {
        let key_var = lookup("STRIPE_SECRET_KEY_ENV")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PaymentError::NotConfigured { var: "STRIPE_SECRET_KEY_ENV".into() })?;
        let secret_key = lookup(&key_var)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PaymentError::NotConfigured { var: key_var.clone() })?;
        let api_base = lookup("STRIPE_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self { secret_key, api_base })
    }
}

pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    /// # Errors
    ///
    /// Returns [`PaymentError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| PaymentError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, secret_key: config.secret_key, api_base: config.api_base })
    }

    /// Start a hosted checkout for one unit of `request.feature_id`.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts before calling out; otherwise any
    /// transport, provider, or parse failure.
    pub async fn create_checkout_session(
        &self,
        request: &CreateSessionRequest,
        origin: &str,
    ) -> Result<PaymentSession, PaymentError> {
        request
            .validate()
            .map_err(|msg| PaymentError::InvalidRequest(msg.to_string()))?;
        let form = checkout_form(request, origin);
        let body = self.send(self.http.post(self.url("/checkout/sessions")).form(&form)).await?;
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| PaymentError::Parse("checkout session missing id".into()))?;
        Ok(PaymentSession {
            session_id: id.to_string(),
            client_secret: body.get("client_secret").and_then(Value::as_str).map(str::to_owned),
            url: body.get("url").and_then(Value::as_str).map(str::to_owned),
        })
    }

    /// Normalized status of a checkout session (`succeeded` once paid).
    ///
    /// # Errors
    ///
    /// Any transport, provider, or parse failure.
    pub async fn session_status(&self, session_id: &str) -> Result<String, PaymentError> {
        if session_id.trim().is_empty() {
            return Err(PaymentError::InvalidRequest("Payment session ID not found".into()));
        }
        if !is_session_id(session_id) {
            return Err(PaymentError::InvalidRequest("Invalid payment session ID".into()));
        }
        let path = format!("/checkout/sessions/{session_id}");
        let body = self.send(self.http.get(self.url(&path))).await?;
        Ok(normalize_session_status(&body))
    }

    /// Most recent payment intents, newest first.
    ///
    /// # Errors
    ///
    /// Any transport, provider, or parse failure.
    pub async fn payment_history(&self) -> Result<Vec<Transaction>, PaymentError> {
        let request = self
            .http
            .get(self.url("/payment_intents"))
            .query(&[("limit", HISTORY_LIMIT.to_string())]);
        let body = self.send(request).await?;
        parse_history(&body)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, PaymentError> {
        let response = request
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| PaymentError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| PaymentError::Request(e.to_string()))?;
        let body: Value = serde_json::from_str(&text).map_err(|e| PaymentError::Parse(e.to_string()))?;
        if !(200..300).contains(&status) {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("payment provider request failed")
                .to_string();
            return Err(PaymentError::Provider { status, message });
        }
        Ok(body)
    }
}

// =============================================================================
// WIRE HELPERS
// =============================================================================

fn checkout_form(request: &CreateSessionRequest, origin: &str) -> Vec<(&'static str, String)> {
    let name = if request.feature_id.is_empty() { "NicheNet Premium".to_string() } else { feature_name(&request.feature_id) };
    vec![
        ("mode", "payment".to_string()),
        ("success_url", success_url(origin)),
        ("cancel_url", cancel_url(origin)),
        ("line_items[0][quantity]", "1".to_string()),
        ("line_items[0][price_data][currency]", request.currency.to_lowercase()),
        ("line_items[0][price_data][unit_amount]", request.amount.to_string()),
        ("line_items[0][price_data][product_data][name]", name),
        ("metadata[feature_id]", request.feature_id.clone()),
    ]
}

/// `ai-assistant` → `Ai Assistant`.
fn feature_name(feature_id: &str) -> String {
    feature_id
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Provider ids are one path segment of ASCII letters, digits, `_` and `-`.
pub(crate) fn is_session_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn normalize_session_status(body: &Value) -> String {
    match body.get("payment_status").and_then(Value::as_str) {
        Some("paid" | "no_payment_required") => STATUS_SUCCEEDED.to_string(),
        Some(other) => other.to_string(),
        None => body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
    }
}

fn parse_history(body: &Value) -> Result<Vec<Transaction>, PaymentError> {
    let Some(rows) = body.get("data").and_then(Value::as_array) else {
        return Err(PaymentError::Parse("payment list missing data".into()));
    };
    rows.iter().map(parse_transaction).collect()
}

fn parse_transaction(row: &Value) -> Result<Transaction, PaymentError> {
    let id = row
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| PaymentError::Parse("payment missing id".into()))?;
    let created = row.get("created").and_then(Value::as_i64).unwrap_or(0);
    let created =
        OffsetDateTime::from_unix_timestamp(created).map_err(|e| PaymentError::Parse(format!("created: {e}")))?;
    let text = |key: &str| row.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
    Ok(Transaction {
        id: id.to_string(),
        amount: row.get("amount").and_then(Value::as_i64).unwrap_or(0),
        currency: text("currency"),
        status: text("status"),
        created,
        description: text("description"),
    })
}

#[cfg(test)]
#[path = "stripe_test.rs"]
mod tests;
