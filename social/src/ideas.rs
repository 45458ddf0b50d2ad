//! Prompt construction and response parsing for the idea assistant.
//!
//! The host sends these prompts to the chat-completions endpoint and hands
//! the raw model text to the parsers below. Model output is not trusted to be
//! valid JSON, so every parser has a fixed fallback.

#[cfg(test)]
#[path = "ideas_test.rs"]
mod ideas_test;

use serde::{Deserialize, Serialize};

use crate::model::{Collaborator, IdeaDraft};

pub const IDEA_SYSTEM_PROMPT: &str = "You are an expert startup advisor helping students develop AI-powered business ideas. Provide practical, actionable advice.";
pub const COLLABORATORS_SYSTEM_PROMPT: &str =
    "You are a startup advisor helping students find the right team members for their projects.";

pub const IDEA_MAX_TOKENS: u32 = 1000;
pub const IDEA_TEMPERATURE: f32 = 0.7;
pub const COLLABORATORS_MAX_TOKENS: u32 = 800;
pub const COLLABORATORS_TEMPERATURE: f32 = 0.6;

/// Skills requested when the assistant page asks for collaborators.
pub const DEFAULT_SKILLS: [&str; 3] = ["Technical", "Marketing", "Design"];

/// Body of `POST /api/ai/idea`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaRequest {
    pub input: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Body of `POST /api/ai/collaborators`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorsRequest {
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

// =============================================================================
// PROMPTS
// =============================================================================

#[must_use]
pub fn idea_prompt(input: &str, interests: &[String]) -> String {
    format!(
        "Generate a startup idea for a student based on the following:\n\
         Input: {input}\n\
         Interests: {}\n\n\
         Please provide:\n\
         1. A clear business idea title\n\
         2. A brief description (2-3 sentences)\n\
         3. Target market\n\
         4. Key features (3-4 points)\n\
         5. Potential challenges\n\
         6. Next steps for validation\n\n\
         Format as JSON with keys: title, description, targetMarket, features, challenges, nextSteps",
        interests.join(", ")
    )
}

#[must_use]
pub fn collaborators_prompt(description: &str, skills: &[String]) -> String {
    format!(
        "Based on this startup idea: \"{description}\"\n\
         Skills needed: {}\n\n\
         Suggest 3-4 types of collaborators this project needs, including:\n\
         1. Role title\n\
         2. Key skills required\n\
         3. Responsibilities\n\
         4. Why they're important for this project\n\n\
         Format as JSON array with keys: role, skills, responsibilities, importance",
        skills.join(", ")
    )
}

// =============================================================================
// PARSING
// =============================================================================

/// Unwrap a Markdown code fence (with or without a language tag).
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Structured idea from model text, or a fallback that keeps the raw text as
/// its description. Any JSON object is taken as is; missing keys stay empty.
#[must_use]
pub fn parse_idea_response(text: &str) -> IdeaDraft {
    serde_json::from_str::<IdeaDraft>(strip_code_fences(text)).unwrap_or_else(|_| fallback_idea(text))
}

#[must_use]
pub fn fallback_idea(raw: &str) -> IdeaDraft {
    IdeaDraft {
        title: "AI-Powered Startup Idea".to_owned(),
        description: raw.trim().to_owned(),
        target_market: "Students and young professionals".to_owned(),
        features: vec!["Feature 1".to_owned(), "Feature 2".to_owned(), "Feature 3".to_owned()],
        challenges: "Market validation and user acquisition".to_owned(),
        next_steps: "Conduct user interviews and build MVP".to_owned(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollaboratorsShape {
    List(Vec<Collaborator>),
    Wrapped { collaborators: Vec<Collaborator> },
}

/// Collaborator list from model text; unparseable output yields the fixed
/// two-entry list. A parsed empty list stays empty.
#[must_use]
pub fn parse_collaborators_response(text: &str) -> Vec<Collaborator> {
    match serde_json::from_str::<CollaboratorsShape>(strip_code_fences(text)) {
        Ok(CollaboratorsShape::List(list) | CollaboratorsShape::Wrapped { collaborators: list }) => list,
        Err(_) => demo_collaborators(),
    }
}

// =============================================================================
// DEMO VALUES
// =============================================================================

/// Shown when the model cannot be reached at all.
#[must_use]
pub fn demo_idea() -> IdeaDraft {
    IdeaDraft {
        title: "AI Study Buddy Platform".to_owned(),
        description: "An AI-powered platform that creates personalized study plans and connects students with similar academic goals for collaborative learning.".to_owned(),
        target_market: "University students struggling with time management and study efficiency".to_owned(),
        features: [
            "AI-generated personalized study schedules",
            "Peer matching for study groups",
            "Progress tracking and analytics",
            "Integration with academic calendars",
        ]
        .map(str::to_owned)
        .to_vec(),
        challenges: "User adoption and ensuring AI recommendations are truly helpful".to_owned(),
        next_steps: "Survey students about current study habits and pain points".to_owned(),
    }
}

#[must_use]
pub fn demo_collaborators() -> Vec<Collaborator> {
    vec![
        Collaborator {
            role: "Technical Co-founder".to_owned(),
            skills: vec!["Full-stack development".to_owned(), "AI/ML".to_owned()],
            responsibilities: "Build and maintain the platform".to_owned(),
            importance: "Essential for bringing the technical vision to life".to_owned(),
        },
        Collaborator {
            role: "Marketing Lead".to_owned(),
            skills: vec!["Digital marketing".to_owned(), "Content creation".to_owned()],
            responsibilities: "User acquisition and brand building".to_owned(),
            importance: "Critical for reaching target audience".to_owned(),
        },
    ]
}
