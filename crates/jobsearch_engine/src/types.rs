use std::fmt;

use serde_json::Value;

pub type RequestId = u64;

/// Message shown when the proxy rejects a request without a usable error field.
pub const FALLBACK_HTTP_MESSAGE: &str = "Failed to fetch";
/// Message shown when no structured response was obtained at all.
pub const FALLBACK_TRANSPORT_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SearchCompleted {
        request_id: RequestId,
        result: Result<SearchResponse, SearchError>,
    },
}

/// Successful `{ jobs, rate_limits }` envelope from the proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub status: u16,
    /// Job objects, verbatim.
    pub jobs: Vec<Value>,
    /// The `rate_limits` object when the proxy sent one.
    pub rate_limits: Option<Value>,
}

/// A failed search. `message` is what the user sees; `detail` is for logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message} ({detail})")]
pub struct SearchError {
    pub kind: FailureKind,
    pub message: String,
    pub detail: String,
}

impl SearchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Failure before any structured response; the user gets the generic message.
    pub(crate) fn transport(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self::new(kind, FALLBACK_TRANSPORT_MESSAGE, detail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Encode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Encode => write!(f, "payload encoding failed"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
