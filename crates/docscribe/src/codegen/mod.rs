//! Client code generation.
//!
//! Renders a multi-endpoint Python SDK from an [`ApiSchema`](crate::types::ApiSchema)
//! and single-endpoint snippets (curl, JavaScript `fetch`, Python `requests`)
//! from an [`Endpoint`](crate::types::Endpoint). Each output shape has its own
//! rendering function; there is no general template language involved.

pub mod sdk;
pub mod snippet;

use serde::{Deserialize, Serialize};

pub use sdk::generate_sdk;
pub use snippet::{generate_snippet, SnippetLanguage};

/// Language tag reported alongside generated SDK code.
pub const SDK_LANGUAGE: &str = "python";

/// A generated SDK and the language it is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSdk {
    pub language: String,
    pub code: String,
}

impl GeneratedSdk {
    pub fn python(code: String) -> Self {
        Self {
            language: SDK_LANGUAGE.to_string(),
            code,
        }
    }
}

/// Derive the SDK method name for an endpoint.
///
/// Lower-cased method, an underscore, then the path with every `/` turned
/// into `_`, every `{`/`}` removed, and leading/trailing underscores trimmed
/// from the path part. `GET /users/{id}/posts` becomes `get_users_id_posts`.
///
/// Two endpoints may map to the same name; the generated client keeps both
/// definitions and the later one shadows the earlier.
pub fn derive_method_name(method: &str, path: &str) -> String {
    let path_part: String = path
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| if c == '/' { '_' } else { c })
        .collect();
    format!("{}_{}", method.to_lowercase(), path_part.trim_matches('_'))
}

/// Quote a string as a double-quoted literal valid in both Python and JavaScript.
pub(crate) fn quoted(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}
