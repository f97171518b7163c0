//! # nodefetch
//!
//! Resilient JSON fetching across redundant service nodes. Every request is
//! raced against a timer, and a failed request is retried against another
//! randomly chosen node until one answers.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use nodefetch::{Endpoints, FetchGateway};
//!
//! # async fn run() -> nodefetch::Result<()> {
//! let nodes = Endpoints::new([
//!     "https://discovery-a.example.com",
//!     "https://discovery-b.example.com",
//! ])?;
//!
//! let gateway = FetchGateway::new();
//! let body = gateway
//!     .fetch_until_success(&nodes.candidates("/v1/metrics/aggregates/routes/trailing/month"))
//!     .await?;
//! println!("{}", body["data"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Retry policy
//!
//! The default [`RetryPolicy`] never gives up: with every node down, the
//! returned future stays pending and logs each failed attempt. Use
//! [`RetryPolicy::with_max_attempts`] or `max_elapsed_ms` to bound it.
//!
//! ## Free functions
//!
//! [`fetch_with_timeout`] and [`fetch_until_success`] go through a
//! process-wide gateway, replaceable once with [`set_global_gateway`].

pub mod config;
pub mod endpoints;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod gateway;
pub mod picker;
pub mod recovery;
pub mod transport;

pub use config::GatewayConfig;
pub use endpoints::{DataEnvelope, Endpoints};
pub use error::{FetchError, Result, TIMED_OUT_ERROR};
pub use fallback::{FallbackSuccess, RetryPolicy};
pub use fetch::{with_timeout, DEFAULT_TIMEOUT, DEFAULT_TIMEOUT_MS};
pub use gateway::FetchGateway;
pub use picker::{EndpointPicker, RandomPicker};
pub use recovery::perform_with_fallback;
pub use transport::{ReqwestTransport, Transport};

use once_cell::sync::OnceCell;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

static GLOBAL_GATEWAY: OnceCell<Arc<FetchGateway>> = OnceCell::new();

/// Set the process-wide gateway (first call wins)
pub fn set_global_gateway(gateway: Arc<FetchGateway>) {
    let _ = GLOBAL_GATEWAY.set(gateway);
}

/// Process-wide gateway, created with defaults on first use
pub fn global_gateway() -> Arc<FetchGateway> {
    Arc::clone(GLOBAL_GATEWAY.get_or_init(|| Arc::new(FetchGateway::new())))
}

/// Single GET through the global gateway with an explicit timeout.
pub async fn fetch_with_timeout(url: &str, timeout: Duration) -> Result<Value> {
    global_gateway()
        .fetch_with_timeout_ms(url, fetch::saturating_millis(timeout))
        .await
}

/// Fallback fetch through the global gateway.
pub async fn fetch_until_success(endpoints: &[String]) -> Result<Value> {
    global_gateway().fetch_until_success(endpoints).await
}
