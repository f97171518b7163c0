use thiserror::Error;

/// Marker text carried by every timeout error message.
pub const TIMED_OUT_ERROR: &str = "Request Timed Out";

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Request Timed Out:{url}")]
    Timeout { url: String, after_ms: u64 },

    #[error("Request Timed Out")]
    Elapsed { after_ms: u64 },

    #[error("{reason} ({status}) from {url}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("No endpoints to fetch from")]
    NoEndpoints,

    #[error("Gave up after {attempts} attempts, last error: {last}")]
    Exhausted { attempts: u32, last: Box<FetchError> },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// True for both the per-URL and the generic timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. } | FetchError::Elapsed { .. })
    }

    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL the failed attempt targeted, when there was one.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Timeout { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Network { url, .. }
            | FetchError::InvalidUrl { url, .. }
            | FetchError::Decode { url, .. } => Some(url),
            FetchError::Exhausted { last, .. } => last.url(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_carries_marker_and_url() {
        let err = FetchError::Timeout {
            url: "http://node-a/v1/health".to_string(),
            after_ms: 7500,
        };

        assert!(err.to_string().starts_with(TIMED_OUT_ERROR));
        assert_eq!(err.to_string(), "Request Timed Out:http://node-a/v1/health");
        assert!(err.is_timeout());
        assert_eq!(err.url(), Some("http://node-a/v1/health"));
    }

    #[test]
    fn test_elapsed_message_is_bare_marker() {
        let err = FetchError::Elapsed { after_ms: 10 };
        assert_eq!(err.to_string(), TIMED_OUT_ERROR);
        assert!(err.is_timeout());
        assert_eq!(err.url(), None);
    }

    #[test]
    fn test_status_error_is_not_timeout() {
        let err = FetchError::Status {
            url: "http://node-b".to_string(),
            status: 503,
            reason: "Service Unavailable".to_string(),
        };

        assert!(!err.is_timeout());
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_exhausted_reports_last_url() {
        let err = FetchError::Exhausted {
            attempts: 3,
            last: Box::new(FetchError::Network {
                url: "http://node-c".to_string(),
                message: "connection refused".to_string(),
            }),
        };

        assert_eq!(err.url(), Some("http://node-c"));
        assert!(err.to_string().contains("3 attempts"));
    }
}
