use std::sync::Once;

use jobsearch_core::{
    update, AppState, Effect, FilterState, Job, Msg, RateLimits, RequestId, SearchOutcome,
    SearchPhase, TimeWindow, ACTIVE_JOBS_HOST, FANTASTIC_JOBS_HOST,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn issued(effects: &[Effect]) -> RequestId {
    match effects {
        [Effect::IssueSearch { request_id, .. }] => *request_id,
        other => panic!("expected exactly one IssueSearch, got {other:?}"),
    }
}

fn titled_jobs(prefix: &str, count: usize) -> Vec<Job> {
    (0..count)
        .map(|i| Job::from_value(json!({ "id": format!("{prefix}-{i}"), "title": format!("{prefix} {i}") })))
        .collect()
}

fn success(jobs: Vec<Job>) -> SearchOutcome {
    SearchOutcome::Success {
        jobs,
        rate_limits: None,
    }
}

fn connected() -> (AppState, RequestId) {
    let (state, effects) = update(AppState::new(), Msg::ApiKeyChanged("secret".to_string()));
    let id = issued(&effects);
    (state, id)
}

#[test]
fn empty_credentials_stay_idle() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted(FilterState::default()));

    assert!(effects.is_empty());
    assert_eq!(state.phase(), SearchPhase::Idle);
    assert!(state.jobs().is_empty());
    assert_eq!(state.error(), None);
}

#[test]
fn completing_credentials_issues_first_search() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::ApiKeyChanged("secret".to_string()));

    assert_eq!(state.phase(), SearchPhase::Loading);
    assert!(state.consume_dirty());
    match effects.as_slice() {
        [Effect::IssueSearch { request_id, payload }] => {
            assert_eq!(*request_id, 1);
            assert_eq!(payload.offset, 0);
            assert_eq!(payload.api_key.as_deref(), Some("secret"));
            assert_eq!(payload.api_host.as_deref(), Some(FANTASTIC_JOBS_HOST));
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn unchanged_credentials_do_not_reissue() {
    init_logging();
    let (state, _id) = connected();
    let (mut state, effects) = update(state, Msg::ApiKeyChanged("secret".to_string()));
    assert!(effects.is_empty());
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::ApiHostChanged(FANTASTIC_JOBS_HOST.to_string()));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn success_replaces_results_and_rate_limits() {
    init_logging();
    let (state, id) = connected();
    let limits = RateLimits::from_value(&json!({"x-ratelimit-jobs-remaining": 250}));
    let (state, effects) = update(
        state,
        Msg::SearchCompleted {
            request_id: id,
            outcome: SearchOutcome::Success {
                jobs: titled_jobs("first", 3),
                rate_limits: limits,
            },
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), SearchPhase::Settled);
    let view = state.view();
    assert_eq!(view.job_count, 3);
    assert_eq!(view.jobs[0].title, "first 0");
    assert_eq!(
        view.rate_limits.unwrap().jobs_remaining.as_deref(),
        Some("250")
    );
    assert!(!view.can_go_next);

    // A later response without rate limits clears the previous snapshot.
    let (state, effects) = update(state, Msg::SearchSubmitted(FilterState::default()));
    let id = issued(&effects);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: id,
            outcome: success(titled_jobs("second", 1)),
        },
    );
    assert_eq!(state.jobs().len(), 1);
    assert!(state.rate_limits().is_none());
}

#[test]
fn failure_shows_message_and_clears_results() {
    init_logging();
    let (state, id) = connected();
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: id,
            outcome: success(titled_jobs("old", 5)),
        },
    );

    let (state, effects) = update(state, Msg::SearchSubmitted(FilterState::default()));
    let id = issued(&effects);
    assert_eq!(state.jobs().len(), 5, "results stay visible while loading");

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: id,
            outcome: SearchOutcome::Failed {
                message: "quota exceeded".to_string(),
            },
        },
    );

    assert_eq!(state.phase(), SearchPhase::Settled);
    assert_eq!(state.error(), Some("quota exceeded"));
    assert!(state.jobs().is_empty());
}

#[test]
fn new_request_clears_previous_error() {
    init_logging();
    let (state, id) = connected();
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: id,
            outcome: SearchOutcome::Failed {
                message: "Failed to fetch".to_string(),
            },
        },
    );
    assert!(state.error().is_some());

    let (state, effects) = update(state, Msg::ApiKeyChanged("other".to_string()));
    issued(&effects);
    assert_eq!(state.phase(), SearchPhase::Loading);
    assert_eq!(state.error(), None);
}

#[test]
fn resubmitting_same_filters_reissues_identical_payload() {
    init_logging();
    let (state, _id) = connected();
    let filters = FilterState {
        title_filter: "Rust".to_string(),
        ..FilterState::default()
    };

    let (state, first) = update(state, Msg::SearchSubmitted(filters.clone()));
    let (_state, second) = update(state, Msg::SearchSubmitted(filters));

    match (first.as_slice(), second.as_slice()) {
        (
            [Effect::IssueSearch {
                request_id: a,
                payload: pa,
            }],
            [Effect::IssueSearch {
                request_id: b,
                payload: pb,
            }],
        ) => {
            assert_eq!(pa, pb);
            assert!(b > a);
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn slow_earlier_response_is_discarded() {
    init_logging();
    let (state, _id) = connected();
    let (state, effects) = update(
        state,
        Msg::SearchSubmitted(FilterState {
            title_filter: "early".to_string(),
            ..FilterState::default()
        }),
    );
    let early = issued(&effects);
    let (state, effects) = update(
        state,
        Msg::SearchSubmitted(FilterState {
            title_filter: "late".to_string(),
            ..FilterState::default()
        }),
    );
    let late = issued(&effects);

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: late,
            outcome: success(titled_jobs("late", 2)),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: early,
            outcome: success(titled_jobs("early", 20)),
        },
    );

    let view = state.view();
    assert_eq!(view.job_count, 2);
    assert_eq!(view.jobs[0].title, "late 0");
    assert_eq!(state.phase(), SearchPhase::Settled);
    state.consume_dirty();

    // A duplicate completion for the settled request is ignored as well.
    let (mut state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: late,
            outcome: success(Vec::new()),
        },
    );
    assert_eq!(state.jobs().len(), 2);
    assert!(!state.consume_dirty());
}

#[test]
fn clearing_a_credential_forces_idle_and_orphans_requests() {
    init_logging();
    let (state, first) = connected();
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: first,
            outcome: success(titled_jobs("shown", 4)),
        },
    );
    let (state, effects) = update(state, Msg::SearchSubmitted(FilterState::default()));
    let pending = issued(&effects);

    let (state, effects) = update(state, Msg::ApiHostChanged(String::new()));
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SearchPhase::Idle);
    assert!(state.jobs().is_empty());
    assert_eq!(state.in_flight(), None);

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: pending,
            outcome: success(titled_jobs("late", 3)),
        },
    );
    assert_eq!(state.phase(), SearchPhase::Idle);
    assert!(state.jobs().is_empty());

    // Restoring the host searches again even though the payload matches an earlier one.
    let (state, effects) = update(state, Msg::ApiHostChanged(FANTASTIC_JOBS_HOST.to_string()));
    issued(&effects);
    assert_eq!(state.phase(), SearchPhase::Loading);
}

#[test]
fn active_provider_locks_time_window() {
    init_logging();
    let (state, _id) = connected();
    let (state, effects) = update(state, Msg::ApiHostChanged(ACTIVE_JOBS_HOST.to_string()));
    issued(&effects);

    let (state, _) = update(
        state,
        Msg::SearchSubmitted(FilterState {
            time_window: TimeWindow::Backfill,
            ..FilterState::default()
        }),
    );
    assert_eq!(state.filters().time_window, TimeWindow::Day);
}

#[test]
fn unknown_host_falls_back_with_warning() {
    init_logging();
    let (state, _id) = connected();
    let (state, effects) = update(state, Msg::ApiHostChanged("jobs.example.com".to_string()));
    issued(&effects);

    let view = state.view();
    assert_eq!(view.provider, jobsearch_core::Provider::Fantastic);
    assert!(view
        .host_warning
        .as_deref()
        .is_some_and(|warning| warning.contains("jobs.example.com")));

    let (state, _) = update(state, Msg::ApiHostChanged(FANTASTIC_JOBS_HOST.to_string()));
    assert_eq!(state.view().host_warning, None);
}
