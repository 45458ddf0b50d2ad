//! LLM adapter for the idea assistant.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables. `LlmClient` owns the
//! configured model name and delegates to the chat-completions client;
//! handlers only see it through the [`LlmChat`] trait so tests can swap in a
//! mock.

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message, Sampling};

/// Configured chat client, built by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: openai::OpenAiClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables (see [`LlmConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, sampling: Sampling, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner.chat(&self.model, sampling, system, messages).await
    }
}
