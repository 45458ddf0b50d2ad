//! Idea assistant calls to the app host.
//!
//! The host falls back to demo content itself; these wrappers only cover the
//! host being unreachable, with the same demo values.

#![allow(clippy::unused_async)]

use social::ideas::{CollaboratorsRequest, IdeaRequest, demo_collaborators, demo_idea};
use social::model::{Collaborator, IdeaDraft};

pub const IDEA_ENDPOINT: &str = "/api/ai/idea";
pub const COLLABORATORS_ENDPOINT: &str = "/api/ai/collaborators";

/// Generate an idea from `input` and the user's interests.
pub async fn generate_idea(input: &str, interests: &[String]) -> IdeaDraft {
    let request = IdeaRequest { input: input.to_owned(), interests: interests.to_vec() };
    match post_json::<_, IdeaDraft>(IDEA_ENDPOINT, &request).await {
        Ok(idea) => idea,
        Err(e) => {
            leptos::logging::warn!("idea generation failed: {e}");
            demo_idea()
        }
    }
}

/// Suggest collaborator roles for an idea description.
pub async fn find_collaborators(description: &str, skills: &[String]) -> Vec<Collaborator> {
    let request = CollaboratorsRequest { description: description.to_owned(), skills: skills.to_vec() };
    match post_json::<_, Vec<Collaborator>>(COLLABORATORS_ENDPOINT, &request).await {
        Ok(list) => list,
        Err(e) => {
            leptos::logging::warn!("collaborator search failed: {e}");
            demo_collaborators()
        }
    }
}

async fn post_json<B, T>(url: &str, body: &B) -> Result<T, String>
where
    B: serde::Serialize,
    T: serde::de::DeserializeOwned,
{
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("{url} failed: {}", resp.status()));
        }
        resp.json::<T>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, body);
        Err("not available on server".to_owned())
    }
}
