//! Natural-language query to endpoint mapping.

use super::parse_reply;
use crate::llm::TextCompletion;
use crate::redact::Redactor;
use crate::types::ApiSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The endpoint a query resolved to. `method`/`path` are `None` when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMatch {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub reasoning: String,
}

impl EndpointMatch {
    /// Payload returned whenever mapping cannot complete.
    pub fn error() -> Self {
        Self {
            method: None,
            path: None,
            reasoning: "Error processing query".to_string(),
        }
    }
}

/// One `"METHOD path: description"` line per endpoint.
pub fn summarize_endpoints(schema: &ApiSchema) -> Vec<String> {
    schema
        .endpoints
        .iter()
        .map(|ep| {
            format!(
                "{} {}: {}",
                ep.method,
                ep.path,
                ep.description.as_deref().unwrap_or("No description")
            )
        })
        .collect()
}

pub fn build_mapping_prompt(schema: &ApiSchema, query: &str) -> String {
    let summary = serde_json::to_string_pretty(&summarize_endpoints(schema))
        .unwrap_or_else(|_| "[]".to_string());
    // Embed the query as a JSON string so quotes in it cannot break the prompt.
    let query = serde_json::to_string(query).unwrap_or_default();

    format!(
        "Given the following API endpoints and a user query, identify the single best matching endpoint.\n\n\
         Endpoints:\n{summary}\n\n\
         User Query: {query}\n\n\
         Return a JSON object with:\n\
         {{\n    \"method\": \"<method>\",\n    \"path\": \"<path>\",\n    \"reasoning\": \"<why_this_matches>\"\n}}\n\n\
         If no endpoint matches well, return null for method and path.\n\
         Do not include markdown formatting.\n"
    )
}

/// Maps plain-language questions onto a schema's endpoints.
#[derive(Clone)]
pub struct SemanticMapper {
    provider: Option<Arc<dyn TextCompletion>>,
    redactor: Redactor,
}

impl SemanticMapper {
    pub fn new(provider: Option<Arc<dyn TextCompletion>>, redactor: Redactor) -> Self {
        Self { provider, redactor }
    }

    /// Find the best-matching endpoint. Never fails; see [`EndpointMatch::error`].
    pub async fn map_query_to_endpoint(&self, schema: &ApiSchema, query: &str) -> EndpointMatch {
        match self.try_map(schema, query).await {
            Ok(found) => found,
            Err(reason) => {
                let reason = self.redactor.redact(&reason);
                tracing::warn!(query, "semantic mapping failed: {reason}");
                EndpointMatch::error()
            }
        }
    }

    async fn try_map(&self, schema: &ApiSchema, query: &str) -> Result<EndpointMatch, String> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| "no text-completion provider configured".to_string())?;
        let reply = provider
            .complete(&build_mapping_prompt(schema, query))
            .await
            .map_err(|e| e.to_string())?;
        parse_reply(&reply)
    }
}
