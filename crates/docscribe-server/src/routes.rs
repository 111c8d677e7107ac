//! HTTP API for Docscribe.
//!
//! All endpoints take and return JSON. Request bodies go through [`AppJson`],
//! so malformed input always produces the structured 422 body.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{DefaultBodyLimit, FromRequest, Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use docscribe::advisor::{EndpointMatch, QualityReport};
use docscribe::codegen::{generate_sdk, generate_snippet, GeneratedSdk};
use docscribe::export::{to_markdown, to_postman, PostmanCollection};
use docscribe::fetch::fetch_text;
use docscribe::health::{HealthCheckRequest, HealthReport};
use docscribe::llm::ProviderKind;
use docscribe::redact::Redactor;
use docscribe::types::{ApiSchema, Endpoint};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Maximum accepted request body.
pub const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// JSON body extractor whose rejection is an [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Build the router with every endpoint and middleware attached.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "request",
            id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    let redactor = state.redactor.clone();
    let catch_panic = CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
        panic_response(panic, &redactor)
    });

    Router::new()
        .route("/api/health", get(liveness))
        .route("/api/parse", post(parse))
        .route("/api/generate-sdk", post(generate_sdk_handler))
        .route("/api/generate-snippet", post(generate_snippet_handler))
        .route("/api/health-check", post(health_check))
        .route("/api/analyze-quality", post(analyze_quality))
        .route("/api/semantic-map", post(semantic_map))
        .route("/api/export-markdown", post(export_markdown))
        .route("/api/export-postman", post(export_postman))
        .layer(catch_panic)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(trace)
        .layer(cors)
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, redactor: &Redactor) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    let message = redactor.redact(&message);
    tracing::error!("handler panicked: {message}");
    ApiError::Internal(message).into_response()
}

// ── Request/response bodies ─────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub url: String,
    #[serde(default)]
    pub provider: ProviderKind,
}

#[derive(Debug, Deserialize)]
pub struct SemanticMapRequest {
    pub schema: ApiSchema,
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SnippetRequest {
    pub endpoint: Endpoint,
    pub base_url: String,
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnippetResponse {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkdownResponse {
    pub markdown: String,
}

// ── Handlers ────────────────────────────────────────────────────

async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Backend is running" }))
}

async fn parse(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ParseRequest>,
) -> Result<Json<ApiSchema>, ApiError> {
    tracing::info!(url = %req.url, provider = %req.provider, "parsing documentation");
    let text = fetch_text(state.fetcher.as_ref(), &req.url)
        .await
        .map_err(|e| ApiError::fetch(e, &state.redactor))?;
    let schema = state
        .extractor
        .parse_documentation(&text, req.provider)
        .await
        .map_err(|e| ApiError::extraction(e, &state.redactor))?;
    Ok(Json(schema))
}

async fn generate_sdk_handler(AppJson(schema): AppJson<ApiSchema>) -> Json<GeneratedSdk> {
    Json(GeneratedSdk::python(generate_sdk(&schema)))
}

async fn generate_snippet_handler(AppJson(req): AppJson<SnippetRequest>) -> Json<SnippetResponse> {
    let code = generate_snippet(&req.endpoint, &req.base_url, &req.language);
    Json(SnippetResponse { code })
}

async fn health_check(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<HealthCheckRequest>,
) -> Json<HealthReport> {
    Json(state.prober.check_health(&req).await)
}

async fn analyze_quality(
    State(state): State<Arc<AppState>>,
    AppJson(schema): AppJson<ApiSchema>,
) -> Json<QualityReport> {
    Json(state.quality.analyze_quality(&schema).await)
}

async fn semantic_map(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SemanticMapRequest>,
) -> Json<EndpointMatch> {
    Json(state.mapper.map_query_to_endpoint(&req.schema, &req.query).await)
}

async fn export_markdown(AppJson(schema): AppJson<ApiSchema>) -> Json<MarkdownResponse> {
    Json(MarkdownResponse {
        markdown: to_markdown(&schema),
    })
}

async fn export_postman(
    State(state): State<Arc<AppState>>,
    AppJson(schema): AppJson<ApiSchema>,
) -> Result<Json<PostmanCollection>, ApiError> {
    to_postman(&schema)
        .map(Json)
        .map_err(|e| ApiError::export(e, &state.redactor))
}
