pub mod models;
pub mod providers;

use crate::config::LlmConfig;
use async_trait::async_trait;
use models::Prompt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM connection error: {0}")]
    ConnectionError(String),
    #[error("LLM response error: {0}")]
    ResponseError(String),
    #[error("LLM configuration error: {0}")]
    ConfigError(String),
}

/// Something that turns a chat prompt into completion text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}

pub struct LlmManager {
    client: Box<dyn CompletionClient>,
    model: String,
}

impl LlmManager {
    /// Builds the Groq-backed manager. Returns `Ok(None)` when no API key is
    /// configured so the service can still start in an unconfigured state.
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>, LlmError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let provider = providers::groq::GroqProvider::new(config, api_key)?;
        Ok(Some(Self::with_client(Box::new(provider), config.model.clone())))
    }

    pub fn with_client(client: Box<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        self.client.complete(prompt).await
    }
}
