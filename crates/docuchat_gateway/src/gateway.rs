use std::sync::mpsc;

use serde_json::Value;

use crate::{GatewayError, GatewayEvent, UploadFile};

/// Transport seam to the backend. Implementations hold no conversation
/// state.
#[async_trait::async_trait]
pub trait BackendGateway: Send + Sync {
    async fn ingest_documents(&self, files: &[UploadFile]) -> Result<(), GatewayError>;

    async fn ingest_url(&self, url: &str) -> Result<(), GatewayError>;

    /// Returns the raw answer payload.
    async fn ask(&self, query: &str) -> Result<Value, GatewayError>;
}

/// Receives settle events from the gateway worker.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: GatewayEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<GatewayEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<GatewayEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: GatewayEvent) {
        let _ = self.tx.send(event);
    }
}
