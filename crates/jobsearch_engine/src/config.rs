use std::time::Duration;

use url::Url;

use crate::types::{FailureKind, SearchError};

/// Backend used when no environment override is present.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Preferred environment variable for the backend base URL.
pub const BACKEND_URL_ENV: &str = "JOBSEARCH_BACKEND_URL";
/// Fallback variable name used by older deployments.
pub const LEGACY_BACKEND_URL_ENV: &str = "BACKEND_URL";
/// Path of the search endpoint below the backend base URL.
pub const SEARCH_PATH: &str = "/api/search";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub backend_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl SearchSettings {
    /// Reads the backend URL from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SearchSettings::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = [BACKEND_URL_ENV, LEGACY_BACKEND_URL_ENV]
            .into_iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Self {
            backend_url,
            ..Self::default()
        }
    }

    pub fn with_backend_url(mut self, backend_url: impl Into<String>) -> Self {
        self.backend_url = backend_url.into();
        self
    }

    /// Full URL of the search endpoint, appended to the base as-is.
    pub fn endpoint(&self) -> Result<Url, SearchError> {
        let raw = format!("{}{}", self.backend_url.trim_end_matches('/'), SEARCH_PATH);
        let url = Url::parse(&raw).map_err(|err| {
            SearchError::transport(FailureKind::InvalidUrl, format!("{raw}: {err}"))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SearchError::transport(
                FailureKind::InvalidUrl,
                format!("unsupported scheme {other}"),
            )),
        }
    }
}
