//! Text-completion providers.
//!
//! Every model backend is reduced to one capability: prompt text in, reply
//! text out ([`TextCompletion`]). Components receive providers explicitly
//! through a [`ProviderSet`], so tests can substitute a stub.

pub mod gemini;
pub mod openai;

use crate::config::DocscribeConfig;
use crate::error::{ExtractionError, ProviderError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// An opaque text-completion service.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Send a prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
    /// Short provider name used in logs and errors.
    fn name(&self) -> &str;
}

/// Selector for one of the supported backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's credential.
    pub fn credential_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The providers available to this process, built once at startup.
#[derive(Clone, Default)]
pub struct ProviderSet {
    gemini: Option<Arc<dyn TextCompletion>>,
    openai: Option<Arc<dyn TextCompletion>>,
}

impl ProviderSet {
    /// An empty set. Every lookup fails with a configuration error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the real HTTP providers for every credential present in `config`.
    pub fn from_config(config: &DocscribeConfig) -> Self {
        let mut set = Self::new();
        if let Some(key) = &config.gemini_api_key {
            set.gemini = Some(Arc::new(GeminiProvider::new(
                key.clone(),
                config.gemini_model.clone(),
                config.llm_timeout,
            )));
        }
        if let Some(key) = &config.openai_api_key {
            set.openai = Some(Arc::new(OpenAiProvider::new(
                key.clone(),
                config.openai_model.clone(),
                config.llm_timeout,
            )));
        }
        tracing::info!(
            gemini = set.gemini.is_some(),
            openai = set.openai.is_some(),
            "text-completion providers configured"
        );
        set
    }

    /// Register (or replace) the provider for `kind`.
    pub fn with(mut self, kind: ProviderKind, provider: Arc<dyn TextCompletion>) -> Self {
        match kind {
            ProviderKind::Gemini => self.gemini = Some(provider),
            ProviderKind::OpenAi => self.openai = Some(provider),
        }
        self
    }

    /// The provider for `kind`, or a configuration error naming the missing credential.
    pub fn get(&self, kind: ProviderKind) -> Result<Arc<dyn TextCompletion>, ExtractionError> {
        let slot = match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenAi => &self.openai,
        };
        slot.clone().ok_or_else(|| ExtractionError::Configuration {
            provider: kind.to_string(),
            reason: format!("{} is not set", kind.credential_var()),
        })
    }

    /// Provider used by the advisory features: Gemini first, then OpenAI.
    pub fn advisory(&self) -> Option<Arc<dyn TextCompletion>> {
        self.gemini.clone().or_else(|| self.openai.clone())
    }
}

/// Shared HTTP client construction for provider backends.
///
/// Backends also set `timeout` on every request, so it holds when the
/// builder fails and the default client is used instead.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("failed to build provider HTTP client, using defaults: {e}");
            reqwest::Client::new()
        })
}

/// Map a reqwest failure into a provider error, separating timeouts.
pub(crate) fn transport_error(
    provider: &str,
    timeout: Duration,
    source: reqwest::Error,
) -> ProviderError {
    if source.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            timeout,
        }
    } else {
        ProviderError::Transport {
            provider: provider.to_string(),
            source,
        }
    }
}

/// Turn a non-2xx reply into a status error carrying the response body.
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        provider: provider.to_string(),
        status: status.as_u16(),
        body,
    })
}
