use std::future::Future;
use std::time::Duration;

use crate::types::RawError;

/// Races `fut` against a timer. An elapsed timer becomes a
/// [`RawError::timeout`], which classifies as "Request Timeout".
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, RawError>
where
    F: Future<Output = Result<T, RawError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(limit_ms = limit.as_millis() as u64, "call timed out");
            Err(RawError::timeout())
        }
    }
}
