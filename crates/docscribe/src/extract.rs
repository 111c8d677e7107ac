//! Schema extraction engine.
//!
//! Turns plain documentation text into an [`ApiSchema`] by asking a
//! text-completion provider to answer with JSON. The prompt carries all of
//! the "parsing" logic; this module owns the deterministic steps around it:
//! input truncation, prompt construction, fence stripping, and strict
//! parsing/validation of the reply.

use crate::error::{ExtractionError, ExtractionResult};
use crate::llm::{ProviderKind, ProviderSet};
use crate::types::ApiSchema;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Maximum number of characters of documentation sent to the provider.
pub const MAX_INPUT_CHARS: usize = 30_000;

/// Worked example embedded in the extraction prompt.
const EXAMPLE_SCHEMA: &str = r#"{
    "title": "API Title",
    "description": "API Description",
    "base_url": "https://api.example.com",
    "endpoints": [
        {
            "path": "/endpoint",
            "method": "GET",
            "description": "Endpoint description",
            "parameters": [
                {
                    "name": "param_name",
                    "type": "string",
                    "required": true,
                    "description": "Parameter description"
                }
            ],
            "response_schema": { "key": "value" }
        }
    ]
}"#;

/// Keep at most [`MAX_INPUT_CHARS`] characters from the head of `text`.
///
/// Counts characters, so a multi-byte code point is never split.
pub fn truncate_input(text: &str) -> &str {
    match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the fixed extraction prompt around already-truncated text.
pub fn build_extraction_prompt(text: &str) -> String {
    format!(
        "You are an expert API documentation parser. Your task is to extract structured \
         API information from the following raw text.\n\n\
         Raw Text:\n{text}\n\n\
         Return the result as a strict JSON object matching the following structure \
         (do not include markdown code blocks):\n{EXAMPLE_SCHEMA}\n"
    )
}

fn opening_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"^```[A-Za-z0-9_+-]*").expect("fence regex is valid"))
}

/// Remove a Markdown code fence wrapped around a model reply.
///
/// Handles ```` ```json ... ``` ````, bare ```` ``` ... ``` ````, and a missing
/// closing fence. Text without a fence is only trimmed.
pub fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(m) = opening_fence().find(text) {
        text = text[m.end()..].trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// Parse a provider reply into a validated schema.
///
/// Every failure is a [`ExtractionError::MalformedResponse`] carrying the
/// original, unstripped reply.
pub fn parse_schema_reply(raw: &str) -> ExtractionResult<ApiSchema> {
    let malformed = |reason: String| ExtractionError::MalformedResponse {
        raw: raw.to_string(),
        reason,
    };

    let json = strip_code_fences(raw);
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| malformed(format!("reply is not valid JSON: {e}")))?;
    let schema: ApiSchema = serde_json::from_value(value)
        .map_err(|e| malformed(format!("reply does not match the schema: {e}")))?;
    schema
        .validate()
        .map_err(|reason| malformed(format!("reply does not match the schema: {reason}")))?;
    Ok(schema)
}

/// Extraction engine bound to the process-wide provider set.
#[derive(Clone)]
pub struct SchemaExtractor {
    providers: ProviderSet,
}

impl SchemaExtractor {
    pub fn new(providers: ProviderSet) -> Self {
        Self { providers }
    }

    /// Extract a schema from documentation text using the selected provider.
    ///
    /// Missing credentials fail before any request is made. Transport and
    /// provider failures are returned as-is and never retried.
    pub async fn parse_documentation(
        &self,
        text: &str,
        provider: ProviderKind,
    ) -> ExtractionResult<ApiSchema> {
        let backend = self.providers.get(provider)?;

        let truncated = truncate_input(text);
        if truncated.len() < text.len() {
            warn!(
                provider = %provider,
                kept_chars = MAX_INPUT_CHARS,
                "documentation truncated before extraction"
            );
        }
        info!(provider = %provider, chars = truncated.chars().count(), "extracting schema");

        let prompt = build_extraction_prompt(truncated);
        let reply = backend.complete(&prompt).await?;

        match parse_schema_reply(&reply) {
            Ok(schema) => {
                info!(
                    title = %schema.title,
                    endpoints = schema.endpoints.len(),
                    "schema extracted"
                );
                Ok(schema)
            }
            Err(e) => {
                error!(provider = %provider, raw = %reply, "failed to parse model reply: {e}");
                Err(e)
            }
        }
    }
}
