//! Endpoint health probing.
//!
//! Issues one real HTTP request and reports status, latency and health.
//! Probing never fails: transport errors are reported in [`HealthReport::error`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

/// Fixed timeout for a single probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

fn default_method() -> String {
    "GET".to_string()
}

/// A probe request as accepted over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckRequest {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Query-string parameters.
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
    #[serde(default)]
    pub headers: Option<Map<String, Value>>,
    /// JSON body, sent only when present.
    #[serde(default)]
    pub body: Option<Value>,
}

impl HealthCheckRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: default_method(),
            params: None,
            headers: None,
            body: None,
        }
    }
}

/// Outcome of a probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// `None` when no response was received.
    pub status_code: Option<u16>,
    /// Wall-clock duration of the whole request, rounded to 0.01 ms.
    pub latency_ms: f64,
    /// True for any 2xx status.
    pub is_healthy: bool,
    pub error: Option<String>,
}

/// HTTP prober with a fixed per-request timeout.
#[derive(Clone)]
pub struct HealthProber {
    client: reqwest::Client,
}

impl Default for HealthProber {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthProber {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("failed to build probe HTTP client, using defaults: {e}");
                reqwest::Client::new()
            });
        Self { client }
    }

    /// Probe an endpoint once.
    pub async fn check_health(&self, request: &HealthCheckRequest) -> HealthReport {
        let start = Instant::now();
        let outcome = self.send(request).await;
        let latency_ms = round_ms(start.elapsed());

        match outcome {
            Ok(status) => {
                tracing::debug!(url = %request.url, status, latency_ms, "probe completed");
                HealthReport {
                    status_code: Some(status),
                    latency_ms,
                    is_healthy: (200..300).contains(&status),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(url = %request.url, "probe failed: {e}");
                HealthReport {
                    status_code: None,
                    latency_ms,
                    is_healthy: false,
                    error: Some(e),
                }
            }
        }
    }

    async fn send(&self, request: &HealthCheckRequest) -> Result<u16, String> {
        let method = reqwest::Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|_| format!("invalid HTTP method: {:?}", request.method))?;

        let mut builder = self
            .client
            .request(method, &request.url)
            .timeout(PROBE_TIMEOUT);
        if let Some(params) = &request.params {
            builder = builder.query(&query_pairs(params));
        }
        if let Some(headers) = &request.headers {
            for (name, value) in headers {
                builder = builder.header(name.as_str(), scalar_text(value));
            }
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}

fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

/// Flatten JSON params into query pairs. Arrays repeat the key; nulls are dropped.
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|v| !v.is_null()) {
                    pairs.push((key.clone(), scalar_text(item)));
                }
            }
            other => pairs.push((key.clone(), scalar_text(other))),
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
