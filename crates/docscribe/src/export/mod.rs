//! Deterministic exports of an [`ApiSchema`](crate::types::ApiSchema).
//!
//! Markdown rendering is total. Postman conversion needs a usable base URL
//! and fails with [`ExportError::InvalidBaseUrl`](crate::error::ExportError) otherwise.

pub mod markdown;
pub mod postman;

pub use markdown::to_markdown;
pub use postman::{to_postman, PostmanCollection, POSTMAN_SCHEMA_URL};
