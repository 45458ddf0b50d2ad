//! Idea assistant service.
//!
//! ERROR HANDLING
//! ==============
//! Neither call fails from the caller's point of view. A missing client or a
//! transport error yields the fixed demo value; a reply that is not the
//! requested JSON yields the parse fallback. Both cases are logged.

use social::ideas::{
    COLLABORATORS_MAX_TOKENS, COLLABORATORS_SYSTEM_PROMPT, COLLABORATORS_TEMPERATURE, IDEA_MAX_TOKENS,
    IDEA_SYSTEM_PROMPT, IDEA_TEMPERATURE, collaborators_prompt, demo_collaborators, demo_idea, idea_prompt,
    parse_collaborators_response, parse_idea_response,
};
use social::model::{Collaborator, IdeaDraft};

use crate::llm::LlmChat;
use crate::llm::types::{Message, Sampling};

/// Generate a structured startup idea from free-form input and interests.
pub async fn generate_idea(llm: Option<&dyn LlmChat>, input: &str, interests: &[String]) -> IdeaDraft {
    let Some(llm) = llm else {
        tracing::debug!("LLM not configured; returning demo idea");
        return demo_idea();
    };
    let sampling = Sampling { max_tokens: IDEA_MAX_TOKENS, temperature: IDEA_TEMPERATURE };
    let messages = [Message::user(idea_prompt(input, interests))];
    match llm.chat(sampling, IDEA_SYSTEM_PROMPT, &messages).await {
        Ok(response) => {
            tracing::info!(
                model = %response.model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "idea generated"
            );
            parse_idea_response(&response.text)
        }
        Err(e) => {
            tracing::warn!(error = %e, retryable = e.retryable(), "idea generation failed; returning demo idea");
            demo_idea()
        }
    }
}

/// Suggest collaborator roles for an idea description.
pub async fn find_collaborators(llm: Option<&dyn LlmChat>, description: &str, skills: &[String]) -> Vec<Collaborator> {
    let Some(llm) = llm else {
        tracing::debug!("LLM not configured; returning demo collaborators");
        return demo_collaborators();
    };
    let sampling = Sampling { max_tokens: COLLABORATORS_MAX_TOKENS, temperature: COLLABORATORS_TEMPERATURE };
    let messages = [Message::user(collaborators_prompt(description, skills))];
    match llm.chat(sampling, COLLABORATORS_SYSTEM_PROMPT, &messages).await {
        Ok(response) => parse_collaborators_response(&response.text),
        Err(e) => {
            tracing::warn!(error = %e, retryable = e.retryable(), "collaborator search failed; returning demo list");
            demo_collaborators()
        }
    }
}

#[cfg(test)]
#[path = "ideas_test.rs"]
mod tests;
