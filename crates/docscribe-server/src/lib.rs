// Copyright 2026 Docscribe Contributors
// SPDX-License-Identifier: MIT

//! Docscribe HTTP server.
//!
//! Exposes the `docscribe` library over a JSON API. The router is built by
//! [`routes::router`] from an explicitly constructed [`AppState`].

pub mod error;
pub mod routes;
pub mod state;

pub use docscribe::redact::Redactor;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use anyhow::Context;
use std::sync::Arc;

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Docscribe API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
