//! Verifier server health reports.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

const HEALTHY_STATUS: &str = "ok";
const TIMED_OUT: &str = "Request timed out";
const CONNECTION_FAILED: &str = "Connection failed";

pub fn health_url(base: &str) -> String {
    format!("{}/health", base.trim_end_matches('/'))
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
}

/// `is_healthy` is `None` until the first check completes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub is_healthy: Option<bool>,
    pub response_time_ms: Option<u64>,
    pub error: Option<String>,
    pub server_info: Option<ServerInfo>,
}

impl HealthReport {
    pub fn unknown() -> Self {
        Self::default()
    }

    fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            is_healthy: Some(false),
            response_time_ms: None,
            error: Some(error.into()),
            server_info: None,
        }
    }

    /// Interprets a completed HTTP exchange. Non-2xx statuses and
    /// unparseable bodies are failures without a response time.
    pub fn from_response(http_status: u16, body: &str, elapsed: Duration) -> Self {
        if !(200..300).contains(&http_status) {
            return Self::unhealthy(format!("HTTP {http_status}"));
        }
        match serde_json::from_str::<ServerInfo>(body) {
            Ok(info) => Self {
                is_healthy: Some(info.status == HEALTHY_STATUS),
                response_time_ms: Some(elapsed.as_millis() as u64),
                error: None,
                server_info: Some(info),
            },
            Err(e) => Self::unhealthy(format!("invalid health response: {e}")),
        }
    }

    pub fn timed_out() -> Self {
        Self::unhealthy(TIMED_OUT)
    }

    pub fn connection_failed(reason: &str) -> Self {
        let reason = reason.trim();
        Self::unhealthy(if reason.is_empty() {
            CONNECTION_FAILED
        } else {
            reason
        })
    }
}

/// Status and body of an HTTP response, as handed back by the host's client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Runs one health probe, giving up after `limit`. `fetch` performs the
/// request against [`health_url`] and reports transport failures as text.
#[cfg(feature = "native")]
pub async fn check_health<F, Fut>(limit: Duration, fetch: F) -> HealthReport
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<HttpResponse, String>>,
{
    let started = std::time::Instant::now();
    let report = match tokio::time::timeout(limit, fetch()).await {
        Err(_) => HealthReport::timed_out(),
        Ok(Err(reason)) => HealthReport::connection_failed(&reason),
        Ok(Ok(response)) => {
            HealthReport::from_response(response.status, &response.body, started.elapsed())
        }
    };
    match report.is_healthy {
        Some(true) => tracing::debug!(response_time_ms = ?report.response_time_ms, "verifier healthy"),
        _ => tracing::warn!(error = ?report.error, "verifier unhealthy"),
    }
    report
}
