use crate::error::{FetchError, Result};
use crate::transport::Transport;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 7500;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
pub(crate) fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// GET `url` through `transport`, giving up after `timeout`.
///
/// The timer runs on the tokio clock and fires whether or not the transport
/// ever yields a result. On expiry the in-flight request future is dropped
/// and any late response is discarded.
pub async fn bounded_fetch<T: Transport>(
    transport: &T,
    url: &str,
    timeout: Duration,
) -> Result<Value> {
    match tokio::time::timeout(timeout, transport.get_json(url)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
            after_ms: saturating_millis(timeout),
        }),
    }
}

/// Race an arbitrary future against `timeout`.
pub async fn with_timeout<F: Future>(future: F, timeout: Duration) -> Result<F::Output> {
    tokio::time::timeout(timeout, future)
        .await
        .map_err(|_| FetchError::Elapsed {
            after_ms: saturating_millis(timeout),
        })
}
