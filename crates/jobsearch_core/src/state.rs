use engine_logging::{engine_debug, engine_info};

use crate::payload::{build_payload, effective_limit};
use crate::provider::{is_known_host, resolve_provider, FANTASTIC_JOBS_HOST};
use crate::view_model::{AppViewModel, JobRowView, RateLimitView};
use crate::{
    Credentials, Effect, FilterState, Job, Provider, RateLimits, RequestPayload, SearchOutcome,
    TimeWindow,
};

/// Monotonic tag attached to every issued search.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Credentials incomplete; nothing is requested or shown.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request completed, with results or an error.
    Settled,
}

/// The single client-side state bundle. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    credentials: Credentials,
    filters: FilterState,
    offset: u64,
    phase: SearchPhase,
    jobs: Vec<Job>,
    rate_limits: Option<RateLimits>,
    error: Option<String>,
    next_request_id: RequestId,
    in_flight: Option<RequestId>,
    last_payload: Option<RequestPayload>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            credentials: Credentials::new("", FANTASTIC_JOBS_HOST),
            filters: FilterState::default(),
            offset: 0,
            phase: SearchPhase::Idle,
            jobs: Vec::new(),
            rate_limits: None,
            error: None,
            next_request_id: 1,
            in_flight: None,
            last_payload: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn rate_limits(&self) -> Option<&RateLimits> {
        self.rate_limits.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the request whose completion will be accepted, if one is pending.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn provider(&self) -> Provider {
        resolve_provider(&self.credentials.api_host)
    }

    /// Payload for the current inputs, whether or not it would be sent.
    pub fn payload(&self) -> RequestPayload {
        build_payload(&self.credentials, &self.filters, self.offset, self.provider())
    }

    pub fn page_limit(&self) -> u64 {
        effective_limit(self.provider(), &self.filters)
    }

    /// Optimistic: a full page suggests another one exists. Wrong when the
    /// final page happens to be exactly full.
    pub fn has_more(&self) -> bool {
        self.jobs.len() as u64 >= self.page_limit()
    }

    pub fn view(&self) -> AppViewModel {
        let provider = self.provider();
        let host = &self.credentials.api_host;
        let host_warning = (!host.is_empty() && !is_known_host(host)).then(|| {
            format!(
                "Unrecognized API host '{host}'; using {} field rules",
                provider.label()
            )
        });

        AppViewModel {
            phase: self.phase,
            provider,
            api_host: host.clone(),
            has_api_key: !self.credentials.api_key.is_empty(),
            host_warning,
            offset: self.offset,
            page_limit: self.page_limit(),
            job_count: self.jobs.len(),
            jobs: self.jobs.iter().map(JobRowView::from_job).collect(),
            rate_limits: self.rate_limits.as_ref().map(RateLimitView::from_limits),
            error: self.error.clone(),
            can_go_previous: self.offset > 0,
            can_go_next: self.has_more(),
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_api_key(&mut self, api_key: String) -> bool {
        if self.credentials.api_key == api_key {
            return false;
        }
        self.credentials.api_key = api_key;
        self.dirty = true;
        true
    }

    pub(crate) fn set_api_host(&mut self, api_host: String) -> bool {
        if self.credentials.api_host == api_host {
            return false;
        }
        self.credentials.api_host = api_host;
        self.dirty = true;
        true
    }

    /// Replaces the filters wholesale and rewinds to the first page.
    pub(crate) fn submit_filters(&mut self, mut filters: FilterState) {
        // Active Jobs DB only serves the last 24 hours.
        if self.provider() == Provider::Active {
            filters.time_window = TimeWindow::Day;
        }
        self.filters = filters;
        self.offset = 0;
        self.dirty = true;
    }

    pub(crate) fn next_page(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.offset += self.page_limit();
        self.dirty = true;
        true
    }

    pub(crate) fn previous_page(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset = self.offset.saturating_sub(self.page_limit());
        self.dirty = true;
        true
    }

    /// Issues a search when credentials are complete and the payload changed,
    /// or unconditionally when `force` is set. Falls back to Idle otherwise.
    pub(crate) fn sync_search(&mut self, force: bool) -> Option<Effect> {
        if !self.credentials.is_complete() {
            self.enter_idle();
            return None;
        }

        let payload = self.payload();
        if !force && self.last_payload.as_ref() == Some(&payload) {
            return None;
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        self.last_payload = Some(payload.clone());
        self.phase = SearchPhase::Loading;
        self.error = None;
        self.dirty = true;
        engine_debug!(
            "Issuing search request_id={} provider={} offset={}",
            request_id,
            self.provider().label(),
            payload.offset
        );
        Some(Effect::IssueSearch {
            request_id,
            payload,
        })
    }

    fn enter_idle(&mut self) {
        let changed = self.phase != SearchPhase::Idle
            || !self.jobs.is_empty()
            || self.error.is_some()
            || self.in_flight.is_some();
        if let Some(orphaned) = self.in_flight.take() {
            engine_info!("Credentials cleared; dropping request_id={}", orphaned);
        }
        self.phase = SearchPhase::Idle;
        self.jobs.clear();
        self.error = None;
        self.last_payload = None;
        if changed {
            self.dirty = true;
        }
    }

    /// Applies a completion. Returns false when the response is stale.
    pub(crate) fn apply_outcome(&mut self, request_id: RequestId, outcome: SearchOutcome) -> bool {
        if self.in_flight != Some(request_id) {
            engine_debug!(
                "Discarding stale response request_id={} latest={:?}",
                request_id,
                self.in_flight
            );
            return false;
        }

        self.in_flight = None;
        self.phase = SearchPhase::Settled;
        match outcome {
            SearchOutcome::Success { jobs, rate_limits } => {
                self.jobs = jobs;
                self.rate_limits = rate_limits;
                self.error = None;
            }
            SearchOutcome::Failed { message } => {
                self.jobs.clear();
                self.error = Some(message);
            }
        }
        self.dirty = true;
        true
    }
}
