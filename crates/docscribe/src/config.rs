//! Configuration loading and resolution.
//!
//! Everything is resolved once at startup into a [`DocscribeConfig`] and handed
//! to the components that need it. Nothing reads the environment afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct DocscribeConfig {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_model: String,
    /// Upper bound for a single text-completion call.
    pub llm_timeout: Duration,
    /// Upper bound for rendering one documentation page.
    pub fetch_timeout: Duration,
    pub chromium_path: Option<PathBuf>,
    pub addr: String,
}

impl Default for DocscribeConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            chromium_path: None,
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl DocscribeConfig {
    /// Load `.env` from the working directory (if any), then read the process environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("ignoring unreadable .env file: {e}"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a specific env file, falling back to the process environment for
    /// keys the file does not set. The process environment is not modified.
    pub fn from_env_file(path: &Path) -> Result<Self, dotenvy::Error> {
        let mut pairs = std::collections::HashMap::new();
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            pairs.insert(key, value);
        }
        Ok(Self::from_lookup(|key| {
            pairs
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        }))
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let secs = |key: &str, default: u64| {
            non_empty(key)
                .and_then(|v| match v.trim().parse::<u64>() {
                    Ok(n) if n > 0 => Some(n),
                    _ => {
                        tracing::warn!("{key}={v:?} is not a positive integer, using {default}");
                        None
                    }
                })
                .unwrap_or(default)
        };

        Self {
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            gemini_model: non_empty("DOCSCRIBE_GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            openai_model: non_empty("DOCSCRIBE_OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            llm_timeout: Duration::from_secs(secs(
                "DOCSCRIBE_LLM_TIMEOUT_SECS",
                DEFAULT_LLM_TIMEOUT_SECS,
            )),
            fetch_timeout: Duration::from_secs(secs(
                "DOCSCRIBE_FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )),
            chromium_path: non_empty("DOCSCRIBE_CHROMIUM_PATH").map(PathBuf::from),
            addr: non_empty("DOCSCRIBE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
        }
    }

    /// Every configured secret, for scrubbing outbound error messages.
    pub fn secrets(&self) -> Vec<String> {
        [&self.gemini_api_key, &self.openai_api_key]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}
