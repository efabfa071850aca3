/// Host of the Active Jobs DB upstream.
pub const ACTIVE_JOBS_HOST: &str = "active-jobs-db.p.rapidapi.com";
/// Host of the Fantastic.jobs upstream, also the initial host.
pub const FANTASTIC_JOBS_HOST: &str = "fantastic.p.rapidapi.com";

/// Upstream job-listings API whose field and limit rules shape the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    /// Fantastic.jobs: accepts every filter field.
    #[default]
    Fantastic,
    /// Active Jobs DB: title, location and a clamped limit only.
    Active,
}

impl Provider {
    pub fn label(self) -> &'static str {
        match self {
            Provider::Fantastic => "fantastic",
            Provider::Active => "active",
        }
    }
}

/// Selects the provider from the configured host. Any host that does not
/// contain the Active Jobs DB hostname, including the empty string, falls
/// back to [`Provider::Fantastic`].
pub fn resolve_provider(api_host: &str) -> Provider {
    if api_host.contains(ACTIVE_JOBS_HOST) {
        Provider::Active
    } else {
        Provider::Fantastic
    }
}

/// True when the host names one of the two upstreams this client knows.
pub fn is_known_host(api_host: &str) -> bool {
    api_host.contains(ACTIVE_JOBS_HOST) || api_host.contains(FANTASTIC_JOBS_HOST)
}
