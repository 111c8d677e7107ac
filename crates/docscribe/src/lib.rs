//! Docscribe: turn API documentation pages into a structured schema, then
//! generate client code, exports and diagnostics from it.
//!
//! The pipeline is `fetch` → `content` → `extract` → [`ApiSchema`], with
//! `codegen`, `export` and `advisor` consuming the schema independently.
//! Every external service (browser, text-completion providers, probed
//! endpoints) sits behind a trait or an explicitly constructed client.

pub mod advisor;
pub mod codegen;
pub mod config;
pub mod content;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod health;
pub mod llm;
pub mod redact;
pub mod types;

pub use advisor::{EndpointMatch, QualityAnalyzer, QualityReport, SemanticMapper};
pub use codegen::{derive_method_name, generate_sdk, generate_snippet, GeneratedSdk, SnippetLanguage};
pub use config::DocscribeConfig;
pub use content::extract_text;
pub use error::{ExportError, ExtractionError, ExtractionResult, FetchError, ProviderError};
pub use export::{to_markdown, to_postman, PostmanCollection};
pub use extract::SchemaExtractor;
pub use fetch::{default_fetcher, fetch_text, PageFetcher};
pub use health::{HealthCheckRequest, HealthProber, HealthReport};
pub use llm::{ProviderKind, ProviderSet, TextCompletion};
pub use redact::Redactor;
pub use types::{ApiSchema, Endpoint, Parameter};
