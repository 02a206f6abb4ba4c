use crate::{Origin, Palette, Rendering, Transcript};

/// Text of the transient indicator shown while a request is in flight.
pub const PROCESSING_TEXT: &str = "Processing your request...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub items: Vec<ViewItem>,
    pub pending_files: Vec<String>,
    pub url_text: String,
    pub query_text: String,
    pub busy: bool,
    pub upload_enabled: bool,
    pub url_enabled: bool,
    pub query_enabled: bool,
    pub is_empty_conversation: bool,
    pub palette: Palette,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewItem {
    Message(MessageView),
    /// Never stored in the transcript; only present while busy.
    Processing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub origin: Origin,
    pub rendering: Rendering,
    /// Paragraph units in display order.
    pub units: Vec<String>,
}

/// Maps the transcript to renderable items.
///
/// Structured records become one unit per `'\n'` segment, Plain records a
/// single verbatim unit. A processing indicator follows the last record
/// while `busy` is set.
pub fn present(transcript: &Transcript, busy: bool) -> Vec<ViewItem> {
    let mut items: Vec<ViewItem> = transcript
        .iter()
        .map(|record| {
            let units = match record.rendering() {
                Rendering::Structured => record.text().split('\n').map(str::to_owned).collect(),
                Rendering::Plain => vec![record.text().to_owned()],
            };
            ViewItem::Message(MessageView {
                origin: record.origin(),
                rendering: record.rendering(),
                units,
            })
        })
        .collect();
    if busy {
        items.push(ViewItem::Processing);
    }
    items
}
