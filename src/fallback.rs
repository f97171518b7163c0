use crate::error::{FetchError, Result};
use crate::fetch::bounded_fetch;
use crate::picker::EndpointPicker;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;

/// Limits on the fallback loop. The default retries forever with no delay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Stop after this many attempts; 0 means no limit
    #[serde(default)]
    pub max_attempts: Option<u32>,
    /// Stop once this much time has passed since the first attempt
    #[serde(default)]
    pub max_elapsed_ms: Option<u64>,
    /// Pause between attempts
    #[serde(default)]
    pub backoff_ms: u64,
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..Self::default()
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.attempt_limit().is_some() || self.max_elapsed_ms.is_some()
    }

    fn attempt_limit(&self) -> Option<u32> {
        self.max_attempts.filter(|max| *max > 0)
    }

    fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    fn exhausted(&self, attempts: u32, started: Instant) -> bool {
        let over_attempts = self.attempt_limit().is_some_and(|max| attempts >= max);
        let over_time = self
            .max_elapsed_ms
            .is_some_and(|max| started.elapsed() >= Duration::from_millis(max));
        over_attempts || over_time
    }
}

/// Successful attempt: which candidate answered and what it returned.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackSuccess {
    pub endpoint: String,
    pub body: Value,
    pub attempts: u32,
}

/// Fetch from randomly chosen candidates until one answers.
///
/// Every attempt draws a fresh index over the full candidate list, so an
/// endpoint that just failed can be picked again. Every failure kind is
/// retried. Returns [`FetchError::NoEndpoints`] for an empty list and
/// [`FetchError::Exhausted`] once a bounded `policy` runs out.
pub async fn fetch_until_success<T, P>(
    transport: &T,
    picker: &P,
    endpoints: &[String],
    timeout: Duration,
    policy: &RetryPolicy,
) -> Result<FallbackSuccess>
where
    T: Transport,
    P: EndpointPicker,
{
    if endpoints.is_empty() {
        return Err(FetchError::NoEndpoints);
    }

    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        let endpoint = &endpoints[picker.pick(endpoints.len()) % endpoints.len()];
        attempts = attempts.saturating_add(1);
        tracing::info!(attempt = attempts, endpoint = %endpoint, "Attempting endpoint");

        let err = match bounded_fetch(transport, endpoint, timeout).await {
            Ok(body) => {
                return Ok(FallbackSuccess {
                    endpoint: endpoint.clone(),
                    body,
                    attempts,
                })
            }
            Err(e) => e,
        };

        tracing::warn!(
            attempt = attempts,
            endpoint = %endpoint,
            error = %err,
            "Endpoint failed"
        );

        if policy.exhausted(attempts, started) {
            tracing::error!(
                attempts,
                candidates = endpoints.len(),
                "Giving up on all candidate endpoints"
            );
            return Err(FetchError::Exhausted {
                attempts,
                last: Box::new(err),
            });
        }

        let backoff = policy.backoff();
        if backoff.is_zero() {
            // Instant failures never suspend; yield so the loop can't starve the runtime.
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(backoff).await;
        }
    }
}
