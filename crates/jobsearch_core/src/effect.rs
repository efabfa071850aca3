use crate::{RequestId, RequestPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST `payload` to the backend proxy and report back with `request_id`.
    IssueSearch {
        request_id: RequestId,
        payload: RequestPayload,
    },
}
