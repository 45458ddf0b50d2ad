//! Error type for calls against external collaborators.
//!
//! ERROR HANDLING
//! ==============
//! Every backend, host, or provider call returns `Result<T, ApiError>`.
//! Callers log the error and show a short inline message or fall back to a
//! demo value; nothing here is retried.

use serde_json::Value;

/// PostgREST code for "JSON object requested, multiple (or no) rows returned".
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Failure of an external call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Credentials for the collaborator are absent (demo mode).
    #[error("service not configured")]
    NotConfigured,

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator answered with a non-success status.
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A single-row lookup matched nothing.
    #[error("record not found")]
    NotFound,
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    ///
    /// Backend error bodies carry the human message under one of several keys
    /// depending on which service produced them (`message` for PostgREST,
    /// `msg`/`error_description` for auth, `error` for the host).
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        if let Some(json) = &parsed {
            if json.get("code").and_then(Value::as_str) == Some(NO_ROWS_CODE) {
                return Self::NotFound;
            }
        }
        let message = parsed
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| default_status_message(status, body));
        Self::Status { status, message }
    }

    /// Message suitable for inline display next to a form.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::NotFound => "Not found.".to_owned(),
            Self::NotConfigured => "This feature is running in demo mode.".to_owned(),
            Self::Network(_) | Self::Decode(_) => "Something went wrong. Please try again.".to_owned(),
        }
    }
}

fn extract_message(json: &Value) -> Option<String> {
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| match json.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Object(inner)) => inner.get("message").and_then(Value::as_str).map(str::to_owned),
            _ => None,
        })
}

fn default_status_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() { format!("status {status}") } else { trimmed.to_owned() }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
