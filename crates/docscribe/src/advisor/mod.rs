//! Advisory features built on a text-completion provider.
//!
//! Unlike schema extraction, these are best-effort: any failure (missing
//! provider, transport error, unparseable reply) is logged and folded into a
//! fixed fallback payload instead of being returned as an error.

pub mod quality;
pub mod semantic;

pub use quality::{QualityAnalyzer, QualityReport};
pub use semantic::{EndpointMatch, SemanticMapper};

use crate::extract::strip_code_fences;
use serde::de::DeserializeOwned;

/// Parse a fenced-or-bare JSON reply into `T`.
pub(crate) fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, String> {
    serde_json::from_str(strip_code_fences(reply)).map_err(|e| format!("invalid JSON reply: {e}"))
}
