use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::envelope::{error_message, parse_body, success_response};
use crate::{FailureKind, RequestId, SearchError, SearchResponse, SearchSettings};

/// Executes one search against the backend proxy.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(
        &self,
        request_id: RequestId,
        payload: &Value,
    ) -> Result<SearchResponse, SearchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchBackend {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl ReqwestSearchBackend {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::transport(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn too_large(&self, actual: u64) -> SearchError {
        SearchError::transport(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl SearchBackend for ReqwestSearchBackend {
    async fn search(
        &self,
        request_id: RequestId,
        payload: &Value,
    ) -> Result<SearchResponse, SearchError> {
        let endpoint = self.settings.endpoint()?;
        let body = serde_json::to_vec(payload)
            .map_err(|err| SearchError::transport(FailureKind::Encode, err.to_string()))?;

        engine_info!("POST {} request_id={} body_len={}", endpoint, request_id, body.len());
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let data = parse_body(&bytes);
        if !status.is_success() {
            let message = error_message(&data);
            engine_warn!(
                "Search request_id={} rejected with {}: {}",
                request_id,
                status,
                message
            );
            return Err(SearchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
                status.to_string(),
            ));
        }

        let response = success_response(status.as_u16(), data);
        engine_debug!(
            "Search request_id={} returned {} jobs (rate limits: {})",
            request_id,
            response.jobs.len(),
            response.rate_limits.is_some()
        );
        Ok(response)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::transport(FailureKind::Timeout, err.to_string());
    }
    SearchError::transport(FailureKind::Network, err.to_string())
}
