use crate::config::GatewayConfig;
use crate::endpoints::DataEnvelope;
use crate::error::{FetchError, Result};
use crate::fallback::{self, FallbackSuccess, RetryPolicy};
use crate::fetch::{bounded_fetch, DEFAULT_TIMEOUT};
use crate::picker::{EndpointPicker, RandomPicker};
use crate::transport::{ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Fetches JSON from redundant endpoints with a per-request timeout and
/// random fallback between candidates.
pub struct FetchGateway<T = ReqwestTransport, P = RandomPicker> {
    transport: T,
    picker: P,
    timeout: Duration,
    retry: RetryPolicy,
}

impl FetchGateway {
    /// reqwest transport, random picker, 7500 ms timeout, unbounded retry.
    pub fn new() -> Self {
        Self::with_parts(ReqwestTransport::new(), RandomPicker)
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new()
            .with_timeout(config.timeout())
            .with_retry_policy(config.retry.clone())
    }
}

impl Default for FetchGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport, P: EndpointPicker> FetchGateway<T, P> {
    pub fn with_parts(transport: T, picker: P) -> Self {
        Self {
            transport,
            picker,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Single GET bounded by the gateway's timeout
    pub async fn fetch_with_timeout(&self, url: &str) -> Result<Value> {
        bounded_fetch(&self.transport, url, self.timeout).await
    }

    /// Single GET with an explicit timeout in milliseconds
    pub async fn fetch_with_timeout_ms(&self, url: &str, timeout_ms: u64) -> Result<Value> {
        bounded_fetch(&self.transport, url, Duration::from_millis(timeout_ms)).await
    }

    /// Body of the first candidate that answers successfully.
    pub async fn fetch_until_success(&self, candidates: &[String]) -> Result<Value> {
        self.fetch_until_success_detailed(candidates)
            .await
            .map(|success| success.body)
    }

    pub async fn fetch_until_success_detailed(
        &self,
        candidates: &[String],
    ) -> Result<FallbackSuccess> {
        fallback::fetch_until_success(
            &self.transport,
            &self.picker,
            candidates,
            self.timeout,
            &self.retry,
        )
        .await
    }

    /// Fetch with fallback and decode the `data` field of the response.
    ///
    /// A body that doesn't match `D` is a [`FetchError::Decode`] against the
    /// endpoint that served it; it is not retried.
    pub async fn fetch_data<D: DeserializeOwned>(&self, candidates: &[String]) -> Result<D> {
        let success = self.fetch_until_success_detailed(candidates).await?;
        serde_json::from_value::<DataEnvelope<D>>(success.body)
            .map(|envelope| envelope.data)
            .map_err(|e| FetchError::Decode {
                url: success.endpoint,
                message: e.to_string(),
            })
    }
}
