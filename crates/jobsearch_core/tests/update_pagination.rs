use jobsearch_core::{
    update, AppState, Effect, FilterState, Job, Msg, RequestId, SearchOutcome, ACTIVE_JOBS_HOST,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn issued(effects: &[Effect]) -> (RequestId, u64) {
    match effects {
        [Effect::IssueSearch {
            request_id,
            payload,
        }] => (*request_id, payload.offset),
        other => panic!("expected exactly one IssueSearch, got {other:?}"),
    }
}

fn jobs(count: usize) -> Vec<Job> {
    (0..count)
        .map(|i| Job::from_value(json!({ "id": i, "title": format!("Job {i}") })))
        .collect()
}

fn settle(state: AppState, request_id: RequestId, count: usize) -> AppState {
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            outcome: SearchOutcome::Success {
                jobs: jobs(count),
                rate_limits: None,
            },
        },
    );
    state
}

fn connected_with_limit(host: &str, limit: Option<i64>) -> (AppState, RequestId) {
    let (state, _) = update(AppState::new(), Msg::ApiHostChanged(host.to_string()));
    let (state, _) = update(state, Msg::ApiKeyChanged("secret".to_string()));
    let (state, effects) = update(
        state,
        Msg::SearchSubmitted(FilterState {
            limit,
            ..FilterState::default()
        }),
    );
    let (id, offset) = issued(&effects);
    assert_eq!(offset, 0);
    (state, id)
}

#[test]
fn full_page_enables_next_and_advances_by_limit() {
    let (state, id) = connected_with_limit("fantastic.p.rapidapi.com", Some(20));
    let state = settle(state, id, 20);
    let view = state.view();
    assert!(view.can_go_next);
    assert!(!view.can_go_previous);

    let (state, effects) = update(state, Msg::NextPageClicked);
    let (id, offset) = issued(&effects);
    assert_eq!(offset, 20);
    assert_eq!(state.offset(), 20);

    let state = settle(state, id, 7);
    let view = state.view();
    assert!(!view.can_go_next);
    assert!(view.can_go_previous);

    let (state, effects) = update(state, Msg::NextPageClicked);
    assert!(effects.is_empty());
    assert_eq!(state.offset(), 20);

    let (state, effects) = update(state, Msg::PreviousPageClicked);
    assert_eq!(issued(&effects).1, 0);
    assert_eq!(state.offset(), 0);
}

#[test]
fn previous_at_zero_is_noop() {
    let (state, id) = connected_with_limit("fantastic.p.rapidapi.com", Some(20));
    let mut state = settle(state, id, 20);
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::PreviousPageClicked);
    assert!(effects.is_empty());
    assert_eq!(state.offset(), 0);
    assert!(!state.view().can_go_previous);
    assert!(!state.consume_dirty());
}

#[test]
fn active_provider_pages_by_clamped_limit() {
    let (state, id) = connected_with_limit(ACTIVE_JOBS_HOST, Some(500));
    let state = settle(state, id, 99);
    assert!(!state.view().can_go_next);

    let (state, effects) = update(state, Msg::SearchSubmitted(FilterState {
        limit: Some(500),
        ..FilterState::default()
    }));
    let (id, _) = issued(&effects);
    let state = settle(state, id, 100);
    assert_eq!(state.view().page_limit, 100);
    assert!(state.view().can_go_next);

    let (state, effects) = update(state, Msg::NextPageClicked);
    assert_eq!(issued(&effects).1, 100);
    assert_eq!(state.offset(), 100);
}

#[test]
fn unset_limit_defaults_to_twenty_for_fantastic() {
    let (state, id) = connected_with_limit("fantastic.p.rapidapi.com", None);
    let state = settle(state, id, 20);
    assert_eq!(state.view().page_limit, 20);

    let (state, effects) = update(state, Msg::NextPageClicked);
    assert_eq!(issued(&effects).1, 20);
    assert_eq!(state.offset(), 20);
}

#[test]
fn previous_floors_at_zero_when_limit_grows() {
    let (state, id) = connected_with_limit("fantastic.p.rapidapi.com", Some(20));
    let state = settle(state, id, 20);
    let (state, effects) = update(state, Msg::NextPageClicked);
    let (id, _) = issued(&effects);
    let state = settle(state, id, 20);
    assert_eq!(state.offset(), 20);

    // Switching to Active widens the step to 100 without touching the offset.
    let (state, effects) = update(state, Msg::ApiHostChanged(ACTIVE_JOBS_HOST.to_string()));
    let (_, offset) = issued(&effects);
    assert_eq!(offset, 20);

    let (state, effects) = update(state, Msg::PreviousPageClicked);
    assert_eq!(issued(&effects).1, 0);
    assert_eq!(state.offset(), 0);
}

#[test]
fn submit_resets_offset() {
    let (state, id) = connected_with_limit("fantastic.p.rapidapi.com", Some(20));
    let state = settle(state, id, 20);
    let (state, _) = update(state, Msg::NextPageClicked);
    assert_eq!(state.offset(), 20);

    let (state, effects) = update(state, Msg::SearchSubmitted(FilterState::default()));
    assert_eq!(issued(&effects).1, 0);
    assert_eq!(state.offset(), 0);
}
