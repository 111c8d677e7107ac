//! OpenAI chat-completions backend.

use super::{check_status, http_client, transport_error, TextCompletion};
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const OPENAI_API_BASE: &str = "https://api.openai.com";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that parses API documentation.";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// OpenAI text-completion provider.
///
/// Requests JSON-object output; every prompt this crate sends asks for JSON.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            model,
            base_url: OPENAI_API_BASE.to_string(),
            timeout,
        }
    }

    /// Point the provider at a different API root (used against mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl TextCompletion for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "response_format": { "type": "json_object" }
        });

        tracing::debug!(model = %self.model, "calling OpenAI");
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .timeout(self.timeout)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(self.name(), self.timeout, e))?;
        let response = check_status(self.name(), response).await?;

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| transport_error(self.name(), self.timeout, e))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyCompletion {
                provider: self.name().to_string(),
            })
    }

    fn name(&self) -> &str {
        "openai"
    }
}
