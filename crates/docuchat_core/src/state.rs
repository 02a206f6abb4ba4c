use std::fmt;

use crate::view_model::{present, AppViewModel};
use crate::{MessageRecord, PendingSelection, ThemeConfig, Transcript};

pub type RequestId = u64;

/// The three user-triggered actions that reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Upload,
    UrlIngestion,
    Query,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Upload => write!(f, "upload"),
            ActionKind::UrlIngestion => write!(f, "url ingestion"),
            ActionKind::Query => write!(f, "query"),
        }
    }
}

/// Why a gateway call failed. The transcript does not distinguish these;
/// they exist for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkUnavailable,
    ServerError,
    Timeout,
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NetworkUnavailable => write!(f, "network unavailable"),
            FailureKind::ServerError => write!(f, "server error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Unknown => write!(f, "unknown failure"),
        }
    }
}

/// The single outstanding backend request, with what the settle step needs
/// to remember from dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InFlight {
    Upload {
        request_id: RequestId,
        file_count: usize,
    },
    UrlIngestion {
        request_id: RequestId,
        url: String,
    },
    Query {
        request_id: RequestId,
    },
}

impl InFlight {
    pub fn request_id(&self) -> RequestId {
        match self {
            InFlight::Upload { request_id, .. }
            | InFlight::UrlIngestion { request_id, .. }
            | InFlight::Query { request_id } => *request_id,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            InFlight::Upload { .. } => ActionKind::Upload,
            InFlight::UrlIngestion { .. } => ActionKind::UrlIngestion,
            InFlight::Query { .. } => ActionKind::Query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    transcript: Transcript,
    pending: PendingSelection,
    in_flight: Option<InFlight>,
    next_request_id: RequestId,
    theme: ThemeConfig,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: ThemeConfig) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.is_busy();
        let files = self.pending.files();
        AppViewModel {
            items: present(&self.transcript, busy),
            pending_files: files.iter().map(|file| file.display_name.clone()).collect(),
            url_text: self.pending.url_text().to_owned(),
            query_text: self.pending.query_text().to_owned(),
            busy,
            upload_enabled: !busy && !files.is_empty(),
            url_enabled: !busy && !self.pending.url_text().is_empty(),
            query_enabled: !busy && !self.pending.query_text().trim().is_empty(),
            is_empty_conversation: self.transcript.is_empty(),
            palette: self.theme.palette(),
            dark_mode: self.theme.dark_mode,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending(&self) -> &PendingSelection {
        &self.pending
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn theme(&self) -> ThemeConfig {
        self.theme
    }

    /// Returns whether anything visible changed since the last call and
    /// resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn pending_mut(&mut self) -> &mut PendingSelection {
        &mut self.pending
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn append(&mut self, record: MessageRecord) {
        self.transcript.append(record);
        self.dirty = true;
    }

    /// Marks a request as in flight and returns its id.
    pub(crate) fn begin(&mut self, make: impl FnOnce(RequestId) -> InFlight) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(make(request_id));
        self.dirty = true;
        request_id
    }

    /// Releases the busy flag if `request_id` is the outstanding request.
    pub(crate) fn settle(&mut self, request_id: RequestId) -> Option<InFlight> {
        match &self.in_flight {
            Some(in_flight) if in_flight.request_id() == request_id => {
                self.dirty = true;
                self.in_flight.take()
            }
            _ => None,
        }
    }

    pub(crate) fn toggle_dark_mode(&mut self) {
        self.theme.dark_mode = !self.theme.dark_mode;
        self.dirty = true;
    }
}
