//! Page fetching for the extraction pipeline.
//!
//! [`PageFetcher`] abstracts "render this URL and give me the final HTML".
//! The production implementation drives headless Chromium so that
//! JavaScript-rendered documentation is captured; [`HttpFetcher`] is a plain
//! HTTP fallback used when no browser can be found.

pub mod chromium;
pub mod http;

pub use chromium::{find_chromium, ChromiumFetcher};
pub use http::HttpFetcher;

use crate::config::DocscribeConfig;
use crate::content::extract_text;
use crate::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;

/// Retrieves the fully rendered HTML of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Launch Chromium if one can be found, otherwise fall back to plain HTTP.
pub async fn default_fetcher(config: &DocscribeConfig) -> Arc<dyn PageFetcher> {
    match ChromiumFetcher::launch(config).await {
        Ok(fetcher) => Arc::new(fetcher),
        Err(e) => {
            tracing::warn!("Chromium unavailable ({e}); running in HTTP-only mode");
            Arc::new(HttpFetcher::new(config.fetch_timeout))
        }
    }
}

/// Fetch a page and reduce it to plain text. Pages with no text are an error.
pub async fn fetch_text(fetcher: &dyn PageFetcher, url: &str) -> Result<String, FetchError> {
    let html = fetcher.fetch_html(url).await?;
    let text = extract_text(&html);
    if text.is_empty() {
        return Err(FetchError::EmptyContent {
            url: url.to_string(),
        });
    }
    tracing::info!(url, chars = text.chars().count(), "extracted page text");
    Ok(text)
}
