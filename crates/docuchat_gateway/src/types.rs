use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// One document to send to the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub source: UploadSource,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, source: UploadSource) -> Self {
        Self {
            file_name: file_name.into(),
            source,
        }
    }

    pub(crate) async fn load(&self) -> Result<Vec<u8>, GatewayError> {
        match &self.source {
            UploadSource::Bytes(bytes) => Ok(bytes.to_vec()),
            UploadSource::Path(path) => tokio::fs::read(path).await.map_err(|err| {
                GatewayError::new(
                    FailureKind::Unknown,
                    format!("could not read {}: {err}", path.display()),
                )
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkUnavailable,
    ServerError { status: u16 },
    Timeout,
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NetworkUnavailable => write!(f, "network unavailable"),
            FailureKind::ServerError { status } => write!(f, "server error (status {status})"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Unknown => write!(f, "unknown failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayStartError {
    #[error("invalid backend base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("could not build http client: {0}")]
    Client(String),
    #[error("could not start gateway worker: {0}")]
    Worker(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCommand {
    IngestDocuments {
        request_id: RequestId,
        files: Vec<UploadFile>,
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

impl GatewayCommand {
    pub fn request_id(&self) -> RequestId {
        match self {
            GatewayCommand::IngestDocuments { request_id, .. }
            | GatewayCommand::IngestUrl { request_id, .. }
            | GatewayCommand::Ask { request_id, .. } => *request_id,
        }
    }

    /// The event reporting this command as failed with `error`.
    pub fn failed(&self, error: GatewayError) -> GatewayEvent {
        let request_id = self.request_id();
        match self {
            GatewayCommand::IngestDocuments { .. } => GatewayEvent::DocumentsIngested {
                request_id,
                result: Err(error),
            },
            GatewayCommand::IngestUrl { .. } => GatewayEvent::UrlIngested {
                request_id,
                result: Err(error),
            },
            GatewayCommand::Ask { .. } => GatewayEvent::Answered {
                request_id,
                result: Err(error),
            },
        }
    }
}

/// Exactly one event is emitted per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    DocumentsIngested {
        request_id: RequestId,
        result: Result<(), GatewayError>,
    },
    UrlIngested {
        request_id: RequestId,
        result: Result<(), GatewayError>,
    },
    Answered {
        request_id: RequestId,
        result: Result<Value, GatewayError>,
    },
}

impl GatewayEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            GatewayEvent::DocumentsIngested { request_id, .. }
            | GatewayEvent::UrlIngested { request_id, .. }
            | GatewayEvent::Answered { request_id, .. } => *request_id,
        }
    }

    pub fn failure(&self) -> Option<&GatewayError> {
        match self {
            GatewayEvent::DocumentsIngested { result, .. }
            | GatewayEvent::UrlIngested { result, .. } => result.as_ref().err(),
            GatewayEvent::Answered { result, .. } => result.as_ref().err(),
        }
    }
}
