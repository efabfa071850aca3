use engine_logging::engine_warn;

use crate::provider::is_known_host;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ApiKeyChanged(api_key) => {
            if state.set_api_key(api_key) {
                state.sync_search(false).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::ApiHostChanged(api_host) => {
            if !state.set_api_host(api_host) {
                return (state, Vec::new());
            }
            let host = &state.credentials().api_host;
            if !host.is_empty() && !is_known_host(host) {
                engine_warn!(
                    "API host '{}' matches no known provider; falling back to {}",
                    host,
                    state.provider().label()
                );
            }
            state.sync_search(false).into_iter().collect()
        }
        Msg::SearchSubmitted(filters) => {
            state.submit_filters(filters);
            // Every submission re-runs the search, even with identical filters.
            state.sync_search(true).into_iter().collect()
        }
        Msg::NextPageClicked => {
            if state.next_page() {
                state.sync_search(false).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::PreviousPageClicked => {
            if state.previous_page() {
                state.sync_search(false).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::SearchCompleted {
            request_id,
            outcome,
        } => {
            state.apply_outcome(request_id, outcome);
            Vec::new()
        }
    };

    (state, effects)
}
