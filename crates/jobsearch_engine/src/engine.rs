use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use serde_json::Value;

use engine_logging::engine_warn;

use crate::search::{ReqwestSearchBackend, SearchBackend};
use crate::{EngineEvent, RequestId, SearchError, SearchSettings};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] SearchError),
}

enum EngineCommand {
    Search { request_id: RequestId, payload: Value },
}

/// Runs searches on a background runtime and reports completions in the
/// order they finish, which is not necessarily the order they were issued.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SearchSettings) -> Result<Self, EngineError> {
        let backend = ReqwestSearchBackend::new(settings)?;
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<dyn SearchBackend>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn search(&self, request_id: RequestId, payload: Value) {
        if self
            .cmd_tx
            .send(EngineCommand::Search {
                request_id,
                payload,
            })
            .is_err()
        {
            engine_warn!("Engine worker gone; request_id={} not sent", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    backend: &dyn SearchBackend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Search {
            request_id,
            payload,
        } => {
            let result = backend.search(request_id, &payload).await;
            if let Err(err) = &result {
                engine_warn!("Search request_id={} failed: {}", request_id, err);
            }
            let _ = event_tx.send(EngineEvent::SearchCompleted { request_id, result });
        }
    }
}
