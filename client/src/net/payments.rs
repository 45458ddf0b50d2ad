//! Payment calls: demo stand-ins or the host passthrough.
//!
//! The mode is fixed at build time by the presence of a publishable key (see
//! [`crate::util::env::payment_mode`]). Demo mode never leaves the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "payments_test.rs"]
mod payments_test;

use social::model::Transaction;
use social::payment::{
    CreateSessionRequest, ErrorBody, HistoryResponse, PaymentMode, PaymentSession, STATUS_SUCCEEDED, StatusResponse,
    demo_history, demo_session,
};

use crate::util::{clock, env};

pub const CREATE_ENDPOINT: &str = "/api/create-payment-intent";
pub const HISTORY_ENDPOINT: &str = "/api/payment-history";

pub fn status_endpoint(session_id: &str) -> String {
    format!("/api/check-payment-status?session_id={}", urlencoding::encode(session_id))
}

/// Start a checkout session.
///
/// # Errors
///
/// Live mode only: the host's `{error}` message, or the transport error.
pub async fn create_session(request: &CreateSessionRequest) -> Result<PaymentSession, String> {
    request.validate().map_err(str::to_owned)?;
    match env::payment_mode() {
        PaymentMode::Demo => Ok(demo_session()),
        PaymentMode::Live => send::<_, PaymentSession>(CREATE_ENDPOINT, Some(request)).await,
    }
}

/// Hand the browser to the provider's hosted page. Demo sessions complete
/// immediately.
///
/// # Errors
///
/// Live mode: the session has no redirect URL or the browser refused it.
pub fn process_payment(session: &PaymentSession) -> Result<(), String> {
    let Some(url) = session.url.as_deref().filter(|_| env::payment_mode() == PaymentMode::Live) else {
        return Ok(());
    };
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        window.location().set_href(url).map_err(|_| "redirect refused".to_owned())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Ok(())
    }
}

/// # Errors
///
/// Live mode: the host's `{error}` message, or the transport error.
pub async fn check_status(session_id: &str) -> Result<String, String> {
    match env::payment_mode() {
        PaymentMode::Demo => Ok(STATUS_SUCCEEDED.to_owned()),
        PaymentMode::Live => {
            let body: StatusResponse = send::<(), _>(&status_endpoint(session_id), None).await?;
            Ok(body.status)
        }
    }
}

/// # Errors
///
/// Live mode: the host's `{error}` message, or the transport error.
pub async fn history() -> Result<Vec<Transaction>, String> {
    match env::payment_mode() {
        PaymentMode::Demo => Ok(demo_history(clock::now())),
        PaymentMode::Live => {
            let body: HistoryResponse = send::<(), _>(HISTORY_ENDPOINT, None).await?;
            Ok(body.transactions)
        }
    }
}

/// Human message from a host error body, falling back to the status code.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("payment request failed: {status}"))
}

async fn send<B, T>(url: &str, body: Option<&B>) -> Result<T, String>
where
    B: serde::Serialize,
    T: serde::de::DeserializeOwned,
{
    #[cfg(feature = "hydrate")]
    {
        let resp = match body {
            Some(body) => gloo_net::http::Request::post(url).json(body).map_err(|e| e.to_string())?.send().await,
            None => gloo_net::http::Request::get(url).send().await,
        }
        .map_err(|e| e.to_string())?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| e.to_string())?;
        if !(200..300).contains(&status) {
            return Err(error_message(status, &text));
        }
        serde_json::from_str(&text).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, body);
        Err("not available on server".to_owned())
    }
}
