use crate::{FilterState, Job, RateLimits, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the API key field.
    ApiKeyChanged(String),
    /// User edited the API host field; also selects the provider.
    ApiHostChanged(String),
    /// User submitted the search form with these filters.
    SearchSubmitted(FilterState),
    /// User clicked Next.
    NextPageClicked,
    /// User clicked Previous.
    PreviousPageClicked,
    /// Engine completion for a search request.
    SearchCompleted {
        request_id: RequestId,
        outcome: SearchOutcome,
    },
}

/// Normalized result of one request to the backend proxy.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success {
        jobs: Vec<Job>,
        rate_limits: Option<RateLimits>,
    },
    /// Already reduced to the single message shown to the user.
    Failed { message: String },
}
