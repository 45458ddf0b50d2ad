//! Payment passthrough endpoints.
//!
//! Errors are returned as `{"error": message}`. Provider rejections carry the
//! provider's own message.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use social::payment::{CreateSessionRequest, ErrorBody, HistoryResponse, StatusResponse};

use crate::services::stripe::{PaymentError, StripeClient};
use crate::state::AppState;

const FALLBACK_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// `POST /api/create-payment-intent`
pub async fn create_payment_intent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateSessionRequest>,
) -> Response {
    let payments = match configured(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let origin = request_origin(&state, &headers);
    match payments.create_checkout_session(&body, &origin).await {
        Ok(session) => {
            tracing::info!(session_id = %session.session_id, feature = %body.feature_id, "checkout session created");
            Json(session).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// `GET /api/check-payment-status?session_id=..`
pub async fn check_payment_status(State(state): State<AppState>, Query(query): Query<StatusQuery>) -> Response {
    let payments = match configured(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let session_id = query.session_id.unwrap_or_default();
    match payments.session_status(&session_id).await {
        Ok(status) => Json(StatusResponse { status }).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/payment-history`
pub async fn payment_history(State(state): State<AppState>) -> Response {
    let payments = match configured(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match payments.payment_history().await {
        Ok(transactions) => Json(HistoryResponse { transactions }).into_response(),
        Err(e) => error_response(&e),
    }
}

fn configured(state: &AppState) -> Result<&StripeClient, Response> {
    state.payments.as_deref().ok_or_else(|| {
        error_body(StatusCode::SERVICE_UNAVAILABLE, "Payments are not configured on this server")
    })
}

/// Origin for return URLs: configured value, then the caller's `Origin`.
fn request_origin(state: &AppState, headers: &HeaderMap) -> String {
    state
        .public_origin
        .clone()
        .or_else(|| {
            headers
                .get(header::ORIGIN)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| FALLBACK_ORIGIN.to_string())
}

fn error_response(err: &PaymentError) -> Response {
    let status = match err {
        PaymentError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        PaymentError::NotConfigured { .. } => StatusCode::SERVICE_UNAVAILABLE,
        PaymentError::Provider { status, .. } if *status == 404 => StatusCode::NOT_FOUND,
        PaymentError::Provider { .. } | PaymentError::Request(_) | PaymentError::Parse(_) => StatusCode::BAD_GATEWAY,
        PaymentError::HttpClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!(error = %err, %status, "payment call failed");
    let message = match err {
        PaymentError::InvalidRequest(msg) => msg.clone(),
        PaymentError::Provider { message, .. } => message.clone(),
        other => other.to_string(),
    };
    error_body(status, &message)
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message.to_string() })).into_response()
}

#[cfg(test)]
#[path = "payments_test.rs"]
mod tests;
