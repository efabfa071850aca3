use serde::Serialize;

use crate::filters::DEFAULT_PAGE_LIMIT;
use crate::{Credentials, FilterState, Provider};

/// Smallest page Active Jobs DB accepts.
pub const ACTIVE_LIMIT_MIN: u32 = 10;
/// Largest page Active Jobs DB accepts; also the fallback for missing input.
pub const ACTIVE_LIMIT_MAX: u32 = 100;
/// Active Jobs DB only serves plain-text descriptions through the proxy.
pub const ACTIVE_DESCRIPTION_TYPE: &str = "text";

/// JSON body posted to the backend search proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPayload {
    pub offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,
    #[serde(flatten)]
    pub body: ProviderBody,
}

/// Provider-specific part of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProviderBody {
    Active(ActiveBody),
    Fantastic(FilterState),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_filter: Option<String>,
    pub description_type: &'static str,
    pub limit: u32,
}

/// Clamps a requested limit into Active Jobs DB's accepted range.
///
/// Zero and non-numeric input (`None`) count as the maximum before clamping.
pub fn clamp_active_limit(raw: Option<i64>) -> u32 {
    let requested = match raw {
        Some(n) if n != 0 => n,
        _ => i64::from(ACTIVE_LIMIT_MAX),
    };
    // Bounded by the clamp, so the narrowing cast is lossless.
    requested.clamp(i64::from(ACTIVE_LIMIT_MIN), i64::from(ACTIVE_LIMIT_MAX)) as u32
}

/// Page size actually requested from the provider.
///
/// Drives the has-more heuristic and the pagination step.
pub fn effective_limit(provider: Provider, filters: &FilterState) -> u64 {
    match provider {
        Provider::Active => u64::from(clamp_active_limit(filters.limit)),
        Provider::Fantastic => filters
            .limit
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .unsigned_abs(),
    }
}

/// Shapes the outbound request for `provider`.
pub fn build_payload(
    credentials: &Credentials,
    filters: &FilterState,
    offset: u64,
    provider: Provider,
) -> RequestPayload {
    let body = match provider {
        Provider::Active => ProviderBody::Active(ActiveBody {
            title_filter: non_empty(&filters.title_filter),
            location_filter: non_empty(&filters.location_filter),
            description_type: ACTIVE_DESCRIPTION_TYPE,
            limit: clamp_active_limit(filters.limit),
        }),
        Provider::Fantastic => ProviderBody::Fantastic(filters.clone()),
    };

    RequestPayload {
        offset,
        api_key: non_empty(&credentials.api_key),
        api_host: non_empty(&credentials.api_host),
        body,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
