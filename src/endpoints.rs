use crate::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Validated, non-empty set of interchangeable node base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    bases: Vec<String>,
}

impl Endpoints {
    /// Validate `bases`. Trailing slashes are stripped so paths join cleanly.
    pub fn new<I, S>(bases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validated = Vec::new();
        for base in bases {
            let base = base.as_ref().trim();
            if base.is_empty() {
                continue;
            }
            let parsed = Url::parse(base).map_err(|e| FetchError::InvalidUrl {
                url: base.to_string(),
                message: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(FetchError::InvalidUrl {
                    url: base.to_string(),
                    message: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
            validated.push(base.trim_end_matches('/').to_string());
        }

        if validated.is_empty() {
            return Err(FetchError::NoEndpoints);
        }

        Ok(Self { bases: validated })
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Always false: `new` rejects an empty set.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    /// One candidate URL per node for the same request path and query.
    pub fn candidates(&self, path: &str) -> Vec<String> {
        let path = path.trim();
        let sep = if path.is_empty() || path.starts_with('/') || path.starts_with('?') {
            ""
        } else {
            "/"
        };
        self.bases
            .iter()
            .map(|base| format!("{}{}{}", base, sep, path))
            .collect()
    }
}

/// `{ "data": ... }` wrapper that discovery nodes put around responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
