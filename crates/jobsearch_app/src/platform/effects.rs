use std::time::Duration;

use engine_logging::{engine_error, engine_info, engine_warn};
use jobsearch_core::{Effect, Job, Msg, RateLimits, SearchOutcome};
use jobsearch_engine::{
    EngineError, EngineEvent, EngineHandle, SearchSettings, FALLBACK_TRANSPORT_MESSAGE,
};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: SearchSettings) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    /// Hands effects to the engine. Effects that cannot be started settle
    /// immediately; their completion messages are returned.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut immediate = Vec::new();
        for effect in effects {
            match effect {
                Effect::IssueSearch {
                    request_id,
                    payload,
                } => match serde_json::to_value(&payload) {
                    Ok(body) => {
                        engine_info!(
                            "IssueSearch request_id={} offset={}",
                            request_id,
                            payload.offset
                        );
                        self.engine.search(request_id, body);
                    }
                    Err(err) => {
                        engine_error!("Failed to encode request_id={}: {}", request_id, err);
                        immediate.push(Msg::SearchCompleted {
                            request_id,
                            outcome: SearchOutcome::Failed {
                                message: FALLBACK_TRANSPORT_MESSAGE.to_string(),
                            },
                        });
                    }
                },
            }
        }
        immediate
    }

    /// Waits up to `timeout` for engine completions and converts them to messages.
    pub fn wait(&self, timeout: Duration) -> Vec<Msg> {
        let Some(first) = self.engine.recv_timeout(timeout) else {
            return Vec::new();
        };
        let mut msgs = vec![map_event(first)];
        while let Some(event) = self.engine.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { request_id, result } => {
            let outcome = match result {
                Ok(response) => SearchOutcome::Success {
                    jobs: response.jobs.into_iter().map(Job::from_value).collect(),
                    rate_limits: response
                        .rate_limits
                        .as_ref()
                        .and_then(RateLimits::from_value),
                },
                Err(err) => {
                    engine_warn!("Search {} failed: {}", request_id, err.kind);
                    SearchOutcome::Failed {
                        message: err.message,
                    }
                }
            };
            Msg::SearchCompleted {
                request_id,
                outcome,
            }
        }
    }
}
