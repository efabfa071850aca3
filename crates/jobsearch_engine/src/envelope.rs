//! Interpretation of the proxy's JSON envelopes.

use serde_json::{Map, Value};

use crate::types::{SearchResponse, FALLBACK_HTTP_MESSAGE};

/// Parses a response body. Anything that is not a JSON object counts as `{}`.
pub fn parse_body(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::Object(Map::new()),
    }
}

/// Picks the user-facing message out of an error body.
///
/// Precedence: `detail` as a plain string, `detail.message`, `detail.error`,
/// top-level `message`, then the generic fallback. Empty strings are skipped.
pub fn error_message(body: &Value) -> String {
    let detail = body.get("detail");
    let candidates = [
        detail,
        detail.and_then(|d| d.get("message")),
        detail.and_then(|d| d.get("error")),
        body.get("message"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|text| !text.is_empty())
        .unwrap_or(FALLBACK_HTTP_MESSAGE)
        .to_string()
}

/// Builds the success envelope. Missing or malformed `jobs` yields no jobs.
pub fn success_response(status: u16, body: Value) -> SearchResponse {
    let Value::Object(mut fields) = body else {
        return SearchResponse {
            status,
            jobs: Vec::new(),
            rate_limits: None,
        };
    };

    let jobs = match fields.remove("jobs") {
        Some(Value::Array(jobs)) => jobs,
        _ => Vec::new(),
    };
    let rate_limits = fields.remove("rate_limits").filter(Value::is_object);

    SearchResponse {
        status,
        jobs,
        rate_limits,
    }
}
