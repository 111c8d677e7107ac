//! Headless Chromium page fetcher using chromiumoxide.

use super::PageFetcher;
use crate::config::DocscribeConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;

const BROWSER_CANDIDATES: &[&str] = &["google-chrome", "chromium", "chromium-browser"];

/// Locate a Chromium binary: the configured path first, then `PATH`.
pub fn find_chromium(config: &DocscribeConfig) -> Option<PathBuf> {
    if let Some(path) = &config.chromium_path {
        if path.exists() {
            return Some(path.clone());
        }
        tracing::warn!("configured Chromium path {} does not exist", path.display());
    }

    for name in BROWSER_CANDIDATES {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// One shared headless browser; each fetch uses its own tab.
pub struct ChromiumFetcher {
    browser: Browser,
    timeout: Duration,
}

impl ChromiumFetcher {
    /// Launch a headless Chromium instance.
    pub async fn launch(config: &DocscribeConfig) -> Result<Self, FetchError> {
        let chrome_path = find_chromium(config)
            .ok_or_else(|| FetchError::Browser("Chromium not found".to_string()))?;

        let browser_config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .build()
            .map_err(|e| FetchError::Browser(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| FetchError::Browser(format!("failed to launch Chromium: {e}")))?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        tracing::info!("headless Chromium launched");
        Ok(Self {
            browser,
            timeout: config.fetch_timeout,
        })
    }

    async fn render(&self, page: &Page, url: &str) -> Result<String, FetchError> {
        let navigation = |reason: String| FetchError::Navigation {
            url: url.to_string(),
            reason,
        };

        match tokio::time::timeout(self.timeout, page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(navigation(e.to_string())),
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout: self.timeout,
                })
            }
        }
        // Best effort: some pages never fire a second load event.
        let _ = tokio::time::timeout(self.timeout, page.wait_for_navigation()).await;

        let result = page
            .evaluate("document.documentElement.outerHTML")
            .await
            .map_err(|e| navigation(format!("failed to read HTML: {e}")))?;
        result
            .into_value::<String>()
            .map_err(|e| navigation(format!("failed to convert HTML result: {e:?}")))
    }
}

#[async_trait]
impl PageFetcher for ChromiumFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Browser(format!("failed to open tab: {e}")))?;

        let html = self.render(&page, url).await;
        let _ = page.close().await;

        if let Ok(html) = &html {
            tracing::debug!(url, bytes = html.len(), "rendered page in Chromium");
        }
        html
    }
}
