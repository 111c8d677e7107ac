//! Error types for the Docscribe library.
//!
//! Extraction is strict: every failure is surfaced with enough detail to
//! diagnose it. The advisory components (health probes, quality analysis,
//! semantic mapping) do not use these types at their public boundary; they
//! fold failures into sentinel payloads instead.

use std::time::Duration;

/// Failures talking to a text-completion provider.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request to {provider} failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} timed out after {timeout:?}")]
    Timeout { provider: String, timeout: Duration },

    #[error("{provider} returned no completion text")]
    EmptyCompletion { provider: String },
}

/// Failures of the schema extraction engine.
#[derive(thiserror::Error, Debug)]
pub enum ExtractionError {
    /// The requested provider has no credential configured.
    #[error("provider {provider} is not configured: {reason}")]
    Configuration { provider: String, reason: String },

    /// The provider replied, but not with a valid schema. `raw` is the reply verbatim.
    #[error("model returned an invalid schema: {reason}")]
    MalformedResponse { raw: String, reason: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ExtractionError {
    /// The raw provider reply, when the failure carries one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ExtractionError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Failures of the exporters.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Postman export needs a base URL of the form `scheme://host`.
    #[error("base URL {base_url:?} is not of the form scheme://host")]
    InvalidBaseUrl { base_url: String },
}

/// Failures of the page-fetching collaborator.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("browser unavailable: {0}")]
    Browser(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("fetching {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("no readable text at {url}")]
    EmptyContent { url: String },

    #[error("HTTP fetch of {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
