//! Job search core: provider rules, payload shaping and the pure search state machine.
mod effect;
mod filters;
mod job;
mod msg;
mod payload;
mod provider;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filters::{Credentials, FilterState, RemoteFilter, TimeWindow, DEFAULT_PAGE_LIMIT};
pub use job::{Job, RateLimits, JOBS_REMAINING_HEADER, REQUESTS_REMAINING_HEADER};
pub use msg::{Msg, SearchOutcome};
pub use payload::{
    build_payload, clamp_active_limit, effective_limit, ActiveBody, ProviderBody, RequestPayload,
    ACTIVE_DESCRIPTION_TYPE, ACTIVE_LIMIT_MAX, ACTIVE_LIMIT_MIN,
};
pub use provider::{
    is_known_host, resolve_provider, Provider, ACTIVE_JOBS_HOST, FANTASTIC_JOBS_HOST,
};
pub use state::{AppState, RequestId, SearchPhase};
pub use update::update;
pub use view_model::{AppViewModel, JobRowView, RateLimitView};
