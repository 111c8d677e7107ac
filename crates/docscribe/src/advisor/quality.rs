//! Documentation quality scoring.

use super::parse_reply;
use crate::llm::TextCompletion;
use crate::redact::Redactor;
use crate::types::ApiSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Quality verdict for a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// 0 (unusable) to 10 (excellent).
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl QualityReport {
    /// Payload returned whenever analysis cannot complete.
    pub fn failed(reason: &str) -> Self {
        Self {
            score: 0,
            summary: "Failed to analyze quality.".to_string(),
            issues: vec![format!("Analysis error: {reason}")],
            suggestions: Vec::new(),
        }
    }
}

/// Models reply with fractional or out-of-range scores; round and clamp them into 0..=10.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 10.0) as u8)
}

/// Build the analysis prompt from the schema summary.
pub fn build_quality_prompt(schema: &ApiSchema) -> String {
    format!(
        "Analyze the quality of this API endpoint documentation schema and return a JSON object.\n\n\
         Schema Title: {title}\n\
         Base URL: {base_url}\n\
         Endpoints: {count}\n\n\
         Evaluate based on:\n\
         1. Clarity of descriptions (Are they vague or detailed?)\n\
         2. Completeness of parameters (Are types and requirements clear?)\n\
         3. Authentication information (Is it clear how to authenticate?)\n\n\
         Return STRICTLY valid JSON with this structure:\n\
         {{\n    \"score\": <integer_0_to_10>,\n    \"summary\": \"<short_summary_text>\",\n    \
         \"issues\": [\"<list_of_specific_issues_found>\"],\n    \
         \"suggestions\": [\"<list_of_improvements>\"]\n}}\n\n\
         Do not include markdown formatting like ```json ... ```. Just the raw JSON string.\n",
        title = schema.title,
        base_url = schema.base_url.as_deref().unwrap_or("unknown"),
        count = schema.endpoints.len(),
    )
}

/// Scores documentation quality through an optional provider.
#[derive(Clone)]
pub struct QualityAnalyzer {
    provider: Option<Arc<dyn TextCompletion>>,
    redactor: Redactor,
}

impl QualityAnalyzer {
    /// Failure reasons are passed through `redactor` before they are logged or returned.
    pub fn new(provider: Option<Arc<dyn TextCompletion>>, redactor: Redactor) -> Self {
        Self { provider, redactor }
    }

    /// Analyze a schema. Never fails; see [`QualityReport::failed`].
    pub async fn analyze_quality(&self, schema: &ApiSchema) -> QualityReport {
        match self.try_analyze(schema).await {
            Ok(report) => report,
            Err(reason) => {
                let reason = self.redactor.redact(&reason);
                tracing::warn!(title = %schema.title, "quality analysis failed: {reason}");
                QualityReport::failed(&reason)
            }
        }
    }

    async fn try_analyze(&self, schema: &ApiSchema) -> Result<QualityReport, String> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| "no text-completion provider configured".to_string())?;
        let reply = provider
            .complete(&build_quality_prompt(schema))
            .await
            .map_err(|e| e.to_string())?;
        parse_reply(&reply)
    }
}
