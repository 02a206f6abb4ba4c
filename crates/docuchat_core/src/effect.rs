use crate::{PendingFile, RequestId};

/// Backend work requested by [`crate::update`]. Each effect must be answered
/// by exactly one settle message carrying the same request id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    IngestDocuments {
        request_id: RequestId,
        files: Vec<PendingFile>,
    },
    IngestUrl {
        request_id: RequestId,
        url: String,
    },
    Ask {
        request_id: RequestId,
        query: String,
    },
}

impl Effect {
    pub fn request_id(&self) -> RequestId {
        match self {
            Effect::IngestDocuments { request_id, .. }
            | Effect::IngestUrl { request_id, .. }
            | Effect::Ask { request_id, .. } => *request_id,
        }
    }
}
