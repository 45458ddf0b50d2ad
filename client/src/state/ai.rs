//! State for the idea assistant page.
//!
//! Lives in a root context so an unlocked gate and a generated idea survive
//! navigating away and back.

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

use social::model::{Collaborator, IdeaDraft};
use social::payment::PremiumGate;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiState {
    pub gate: PremiumGate,
    pub input: String,
    pub idea: Option<IdeaDraft>,
    pub collaborators: Vec<Collaborator>,
    pub loading: bool,
    /// Set after the current idea was saved, cleared by a new idea.
    pub saved: bool,
}

impl AiState {
    pub fn can_generate(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    pub fn can_find_collaborators(&self) -> bool {
        !self.loading && self.idea.is_some()
    }

    /// Show a fresh idea; suggestions for the previous one no longer apply.
    pub fn show_idea(&mut self, idea: IdeaDraft) {
        self.idea = Some(idea);
        self.collaborators.clear();
        self.saved = false;
        self.loading = false;
    }
}
