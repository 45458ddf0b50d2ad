//! Gradient action button for the idea assistant.

#[cfg(test)]
#[path = "ai_button_test.rs"]
mod ai_button_test;

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiAction {
    GenerateIdea,
    FindCollaborators,
}

impl AiAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::GenerateIdea => "Generate Idea",
            Self::FindCollaborators => "Find Collaborators",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::GenerateIdea => "🧠",
            Self::FindCollaborators => "👥",
        }
    }

    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::GenerateIdea => "ai-button--generate",
            Self::FindCollaborators => "ai-button--collaborate",
        }
    }
}

/// Shows a pulsing bolt instead of the icon while `busy`.
#[component]
pub fn AiButton(
    action: AiAction,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] busy: Signal<bool>,
    on_click: Callback<()>,
) -> impl IntoView {
    let class = format!("btn ai-button {}", action.css_modifier());
    view! {
        <button
            class=class
            type="button"
            disabled=move || disabled.get() || busy.get()
            on:click=move |_| on_click.run(())
        >
            <span class="ai-button__icon" class:ai-button__icon--busy=move || busy.get()>
                {move || if busy.get() { "⚡" } else { action.icon() }}
            </span>
            <span class="ai-button__label">{action.label()}</span>
        </button>
    }
}
