//! HTTP error mapping.
//!
//! Library failures become JSON bodies of the form `{"detail": ...}`.
//! Every message is passed through the [`Redactor`] before it is stored, so
//! credentials never reach a client.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docscribe::error::{ExportError, ExtractionError, FetchError};
use docscribe::redact::Redactor;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Detail returned when a page yields no readable text.
pub const EMPTY_CONTENT_DETAIL: &str = "Failed to extract content from URL";

/// One entry of a 422 response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn from_rejection(rejection: &JsonRejection) -> Self {
        let kind = match rejection {
            JsonRejection::JsonDataError(_) => "value_error",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "missing_content_type",
            JsonRejection::BytesRejection(_) => "body_read_error",
            _ => "request_error",
        };
        Self {
            loc: vec!["body".to_string()],
            msg: rejection.body_text(),
            kind: kind.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Request body could not be read or deserialized (422).
    #[error("Validation Error")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    /// A required provider is not configured (503).
    #[error("{0}")]
    Unavailable(String),

    /// The model replied with something unusable (502).
    #[error("{detail}")]
    BadGateway {
        detail: String,
        raw_response: String,
    },

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn extraction(err: ExtractionError, redactor: &Redactor) -> Self {
        log_server_error(&err, redactor);
        match &err {
            ExtractionError::Configuration { .. } => {
                ApiError::Unavailable(redactor.redact(&err.to_string()))
            }
            ExtractionError::MalformedResponse { raw, .. } => ApiError::BadGateway {
                detail: redactor.redact(&err.to_string()),
                raw_response: redactor.redact(raw),
            },
            ExtractionError::Provider(_) => ApiError::Internal(redactor.redact(&err.to_string())),
        }
    }

    pub fn fetch(err: FetchError, redactor: &Redactor) -> Self {
        match err {
            FetchError::EmptyContent { url } => {
                tracing::warn!(url = %url, "page produced no text");
                ApiError::BadRequest(EMPTY_CONTENT_DETAIL.to_string())
            }
            other => {
                log_server_error(&other, redactor);
                ApiError::Internal(redactor.redact(&other.to_string()))
            }
        }
    }

    pub fn export(err: ExportError, redactor: &Redactor) -> Self {
        ApiError::BadRequest(redactor.redact(&err.to_string()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn log_server_error<E: fmt::Debug>(err: &E, redactor: &Redactor) {
    tracing::error!("request failed: {}", redactor.redact(&format!("{err:?}")));
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        ApiError::Validation(vec![FieldError::from_rejection(&rejection)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errors) => json!({
                "detail": "Validation Error",
                "errors": errors,
            }),
            ApiError::BadGateway {
                detail,
                raw_response,
            } => json!({
                "detail": detail,
                "raw_response": raw_response,
            }),
            other => json!({ "detail": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscribe::error::ProviderError;

    fn redactor() -> Redactor {
        Redactor::new(vec!["sk-secret".to_string()])
    }

    #[test]
    fn test_configuration_is_503() {
        let err = ExtractionError::Configuration {
            provider: "openai".to_string(),
            reason: "OPENAI_API_KEY is not set".to_string(),
        };
        let api = ApiError::extraction(err, &redactor());
        assert_eq!(api.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_malformed_keeps_raw() {
        let err = ExtractionError::MalformedResponse {
            raw: "nope".to_string(),
            reason: "reply is not valid JSON".to_string(),
        };
        match ApiError::extraction(err, &redactor()) {
            ApiError::BadGateway { raw_response, .. } => assert_eq!(raw_response, "nope"),
            other => panic!("expected bad gateway, got {other:?}"),
        }
    }

    #[test]
    fn test_provider_error_is_redacted() {
        let err = ExtractionError::Provider(ProviderError::Status {
            provider: "openai".to_string(),
            status: 401,
            body: "Incorrect API key provided: sk-secret".to_string(),
        });
        let api = ApiError::extraction(err, &redactor());
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = api.to_string();
        assert!(text.starts_with("Internal Server Error: "));
        assert!(text.contains("[REDACTED]"));
        assert!(!text.contains("sk-secret"));
    }

    #[test]
    fn test_empty_content_is_400() {
        let err = FetchError::EmptyContent {
            url: "https://x.io".to_string(),
        };
        let api = ApiError::fetch(err, &redactor());
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.to_string(), EMPTY_CONTENT_DETAIL);
    }

    #[test]
    fn test_invalid_base_url_is_400() {
        let err = ExportError::InvalidBaseUrl {
            base_url: "localhost".to_string(),
        };
        assert_eq!(ApiError::export(err, &redactor()).status(), StatusCode::BAD_REQUEST);
    }
}
