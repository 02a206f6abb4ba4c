use serde_json::Value;

use crate::{FailureKind, PendingFile, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked files; replaces any earlier unconfirmed selection.
    FilesSelected(Vec<PendingFile>),
    /// User removed one pending file by position.
    FileRemoved(usize),
    /// User edited the URL field.
    UrlInputChanged(String),
    /// User edited the question field.
    QueryInputChanged(String),
    /// User clicked Upload.
    UploadClicked,
    /// User submitted the URL field for ingestion.
    UrlSubmitted,
    /// User submitted the question field.
    QuerySubmitted,
    /// User flipped between dark and light themes.
    DarkModeToggled,
    /// Gateway finished a document ingestion.
    UploadSettled {
        request_id: RequestId,
        result: Result<(), FailureKind>,
    },
    /// Gateway finished a URL ingestion.
    UrlSettled {
        request_id: RequestId,
        result: Result<(), FailureKind>,
    },
    /// Gateway finished answering a question.
    QuerySettled {
        request_id: RequestId,
        result: Result<Value, FailureKind>,
    },
}
