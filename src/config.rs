use crate::endpoints::Endpoints;
use crate::error::{FetchError, Result};
use crate::fallback::RetryPolicy;
use crate::fetch::DEFAULT_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "gateway.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URLs of the redundant nodes, e.g. "https://discoveryprovider.example.com"
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![],
            timeout_ms: default_timeout_ms(),
            retry: RetryPolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from {dir}/gateway.json or fall back to defaults,
    /// then apply NODEFETCH_* environment overrides and normalize.
    /// An invalid timeout is logged and replaced by the default.
    pub fn load_or_default(dir: &Path) -> Self {
        let mut config = Self::load_file(&dir.join(CONFIG_FILE)).unwrap_or_default();
        config.apply_env_overrides();
        if let Err(e) = config.normalize() {
            tracing::error!("{}, using {} ms", e, DEFAULT_TIMEOUT_MS);
            config.timeout_ms = DEFAULT_TIMEOUT_MS;
        }
        config
    }

    /// Give every source the same meaning: `max_attempts` 0 retries forever,
    /// and a zero timeout is rejected.
    pub fn normalize(&mut self) -> Result<()> {
        if self.retry.max_attempts == Some(0) {
            self.retry.max_attempts = None;
        }
        if self.timeout_ms == 0 {
            return Err(FetchError::Config("timeout_ms must be greater than 0".into()));
        }
        Ok(())
    }

    fn load_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<GatewayConfig>(&content) {
                Ok(config) => {
                    tracing::info!(
                        "Loaded gateway config: endpoints={}, timeout_ms={}",
                        config.endpoints.len(),
                        config.timeout_ms
                    );
                    Some(config)
                }
                Err(e) => {
                    tracing::error!("Failed to parse {}: {}, using defaults", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::error!("Failed to read {}: {}, using defaults", path.display(), e);
                None
            }
        }
    }

    /// NODEFETCH_ENDPOINTS (comma separated), NODEFETCH_TIMEOUT_MS,
    /// NODEFETCH_MAX_ATTEMPTS. Unparseable values are logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(list) = std::env::var("NODEFETCH_ENDPOINTS") {
            let endpoints: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if !endpoints.is_empty() {
                self.endpoints = endpoints;
            }
        }

        if let Ok(raw) = std::env::var("NODEFETCH_TIMEOUT_MS") {
            match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => self.timeout_ms = ms,
                _ => tracing::warn!("Ignoring invalid NODEFETCH_TIMEOUT_MS={}", raw),
            }
        }

        if let Ok(raw) = std::env::var("NODEFETCH_MAX_ATTEMPTS") {
            match raw.parse::<u32>() {
                Ok(n) => self.retry.max_attempts = Some(n),
                Err(_) => tracing::warn!("Ignoring invalid NODEFETCH_MAX_ATTEMPTS={}", raw),
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        Endpoints::new(&self.endpoints)
    }
}
