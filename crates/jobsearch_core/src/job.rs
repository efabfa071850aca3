use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub const JOBS_REMAINING_HEADER: &str = "x-ratelimit-jobs-remaining";
pub const REQUESTS_REMAINING_HEADER: &str = "x-ratelimit-requests-remaining";

/// A job listing as returned by the proxy, kept verbatim.
///
/// Only the accessors below are interpreted; everything else is passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Job {
    fields: Map<String, Value>,
}

impl Job {
    /// Wraps a JSON value. Non-object values become an empty listing.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Stable identity: `id` when present, otherwise the apply URL.
    pub fn key(&self) -> Option<String> {
        match self.fields.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => self.url().map(ToOwned::to_owned),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn organization(&self) -> Option<&str> {
        self.text("organization")
    }

    pub fn organization_logo(&self) -> Option<&str> {
        self.text("organization_logo")
    }

    pub fn source(&self) -> Option<&str> {
        self.text("source")
    }

    pub fn date_posted(&self) -> Option<&str> {
        self.text("date_posted")
    }

    pub fn url(&self) -> Option<&str> {
        self.text("url")
    }

    pub fn experience_level(&self) -> Option<&str> {
        self.text("ai_experience_level")
    }

    pub fn responsibilities(&self) -> Option<&str> {
        self.text("ai_core_responsibilities")
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.fields.get("remote_derived"), Some(Value::Bool(true)))
    }

    /// First listed employment type, if any.
    pub fn employment_type(&self) -> Option<&str> {
        self.fields
            .get("employment_type")
            .and_then(Value::as_array)
            .and_then(|types| types.first())
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Derived locations, each named by city, then admin area, then country.
    pub fn locations(&self) -> Vec<String> {
        let Some(entries) = self.fields.get("locations_derived").and_then(Value::as_array) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(name) if !name.is_empty() => Some(name.clone()),
                Value::Object(parts) => ["city", "admin", "country"]
                    .iter()
                    .filter_map(|key| parts.get(*key).and_then(Value::as_str))
                    .find(|name| !name.is_empty())
                    .map(ToOwned::to_owned),
                _ => None,
            })
            .collect()
    }
}

/// Remaining-quota counters echoed back from the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateLimits {
    counters: BTreeMap<String, String>,
}

impl RateLimits {
    /// Builds the snapshot from the proxy's `rate_limits` object.
    ///
    /// Counters may arrive as strings or numbers; both are kept as text.
    pub fn from_value(value: &Value) -> Option<Self> {
        let entries = value.as_object()?;
        let counters = entries
            .iter()
            .filter_map(|(name, count)| {
                let count = match count {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((name.to_ascii_lowercase(), count))
            })
            .collect();
        Some(Self { counters })
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.counters
            .get(&header.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn jobs_remaining(&self) -> Option<&str> {
        self.get(JOBS_REMAINING_HEADER)
    }

    pub fn requests_remaining(&self) -> Option<&str> {
        self.get(REQUESTS_REMAINING_HEADER)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
