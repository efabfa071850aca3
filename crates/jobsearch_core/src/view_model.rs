use crate::{Job, Provider, RateLimits, SearchPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: SearchPhase,
    pub provider: Provider,
    pub api_host: String,
    pub has_api_key: bool,
    /// Set when the host matches neither known upstream.
    pub host_warning: Option<String>,
    pub offset: u64,
    pub page_limit: u64,
    pub job_count: usize,
    pub jobs: Vec<JobRowView>,
    pub rate_limits: Option<RateLimitView>,
    pub error: Option<String>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl AppViewModel {
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobRowView {
    pub key: Option<String>,
    pub title: String,
    pub organization: Option<String>,
    pub organization_logo: Option<String>,
    pub locations: Vec<String>,
    /// Raw timestamp as sent by the proxy; formatting is up to the renderer.
    pub date_posted: Option<String>,
    pub source: Option<String>,
    pub remote: bool,
    pub experience_level: Option<String>,
    pub employment_type: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job) -> Self {
        let owned = |value: Option<&str>| value.map(ToOwned::to_owned);
        Self {
            key: job.key(),
            title: job.title().unwrap_or_default().to_string(),
            organization: owned(job.organization()),
            organization_logo: owned(job.organization_logo()),
            locations: job.locations(),
            date_posted: owned(job.date_posted()),
            source: owned(job.source()),
            remote: job.is_remote(),
            experience_level: owned(job.experience_level()),
            employment_type: owned(job.employment_type()),
            url: owned(job.url()),
            summary: owned(job.responsibilities()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateLimitView {
    pub jobs_remaining: Option<String>,
    pub requests_remaining: Option<String>,
}

impl RateLimitView {
    pub(crate) fn from_limits(limits: &RateLimits) -> Self {
        Self {
            jobs_remaining: limits.jobs_remaining().map(ToOwned::to_owned),
            requests_remaining: limits.requests_remaining().map(ToOwned::to_owned),
        }
    }
}
