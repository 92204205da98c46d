use crate::config::LlmConfig;
use crate::llm::models::{ChatMessage, Prompt};
use crate::llm::{CompletionClient, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Client for Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Debug)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl GroqProvider {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        if config.api_url.trim().is_empty() {
            return Err(LlmError::ConfigError(
                "API URL is required for the Groq provider".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for GroqProvider {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: &prompt.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!("Sending completion request to {} with model {}", self.api_url, self.model);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = match response.text().await {
                Ok(body) if !body.is_empty() => format!(" - Response body: {}", body),
                _ => String::new(),
            };

            error!("Groq API responded with status code: {}{}", status, error_body);
            return Err(LlmError::ResponseError(format!(
                "API responded with status code: {}{}",
                status, error_body
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::ResponseError(format!("Failed to read response body: {}", e)))?;

        let completion: CompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            LlmError::ResponseError(format!("Failed to parse completion response: {}", e))
        })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ResponseError("No choices in response".to_string()))?;

        choice
            .message
            .content
            .ok_or_else(|| LlmError::ResponseError("Completion has no message content".to_string()))
    }
}
