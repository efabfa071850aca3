//! Job search engine: talks to the backend search proxy and executes search effects.
mod config;
mod engine;
mod envelope;
mod search;
mod types;

pub use config::{
    SearchSettings, BACKEND_URL_ENV, DEFAULT_BACKEND_URL, LEGACY_BACKEND_URL_ENV, SEARCH_PATH,
};
pub use engine::{EngineError, EngineHandle};
pub use envelope::{error_message, parse_body, success_response};
pub use search::{ReqwestSearchBackend, SearchBackend};
pub use types::{
    EngineEvent, FailureKind, RequestId, SearchError, SearchResponse, FALLBACK_HTTP_MESSAGE,
    FALLBACK_TRANSPORT_MESSAGE,
};
