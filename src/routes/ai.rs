//! Idea assistant endpoints.
//!
//! Both endpoints always answer 200 with usable content; see
//! [`crate::services::ideas`] for the fallback rules. A blank request is the
//! only client error.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use social::ideas::{CollaboratorsRequest, DEFAULT_SKILLS, IdeaRequest};
use social::payment::ErrorBody;

use crate::services::ideas;
use crate::state::AppState;

/// `POST /api/ai/idea`
pub async fn generate_idea(State(state): State<AppState>, Json(body): Json<IdeaRequest>) -> Response {
    if body.input.trim().is_empty() && body.interests.is_empty() {
        return bad_request("Describe an idea or pick at least one interest");
    }
    let idea = ideas::generate_idea(state.llm.as_deref(), body.input.trim(), &body.interests).await;
    Json(idea).into_response()
}

/// `POST /api/ai/collaborators`
pub async fn find_collaborators(State(state): State<AppState>, Json(body): Json<CollaboratorsRequest>) -> Response {
    if body.description.trim().is_empty() {
        return bad_request("An idea description is required");
    }
    let skills = if body.skills.is_empty() {
        DEFAULT_SKILLS.iter().map(|s| (*s).to_string()).collect()
    } else {
        body.skills
    };
    let list = ideas::find_collaborators(state.llm.as_deref(), body.description.trim(), &skills).await;
    Json(list).into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message.to_string() })).into_response()
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
