use docuchat_logging::{dc_debug, dc_info, dc_warn};
use serde_json::Value;

use crate::answer::answer_text;
use crate::{
    ActionKind, AppState, Effect, FailureKind, InFlight, MessageRecord, Msg, RequestId,
};

pub const UPLOAD_FAILED_TEXT: &str = "Error uploading documents. Please try again.";
pub const URL_FAILED_TEXT: &str = "Error processing URL. Please check the link and try again.";
pub const QUERY_FAILED_TEXT: &str = "Error fetching response. Please try again later.";

pub fn upload_success_text(file_count: usize) -> String {
    let plural = if file_count > 1 { "s" } else { "" };
    format!("Successfully uploaded {file_count} document{plural}.")
}

pub fn url_success_text(url: &str) -> String {
    format!("URL processed successfully: {url}")
}

/// Pure update function: applies a message to state and returns any effects.
///
/// At most one request is in flight. Triggers that arrive while busy, or
/// whose input is empty, change nothing and produce no effect.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            state.pending_mut().select_files(files);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FileRemoved(index) => {
            if state.pending_mut().remove_file(index) {
                state.mark_dirty();
            } else {
                dc_debug!("Ignoring removal of pending file at out-of-range index {}", index);
            }
            Vec::new()
        }
        Msg::UrlInputChanged(text) => {
            state.pending_mut().set_url_text(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::QueryInputChanged(text) => {
            state.pending_mut().set_query_text(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::UploadClicked => submit_upload(&mut state),
        Msg::UrlSubmitted => submit_url(&mut state),
        Msg::QuerySubmitted => submit_query(&mut state),
        Msg::DarkModeToggled => {
            state.toggle_dark_mode();
            Vec::new()
        }
        Msg::UploadSettled { request_id, result } => {
            if let Some(InFlight::Upload { file_count, .. }) =
                take_in_flight(&mut state, request_id, ActionKind::Upload)
            {
                match result {
                    Ok(()) => {
                        dc_info!("Upload {} succeeded ({} files)", request_id, file_count);
                        state.append(MessageRecord::notice(upload_success_text(file_count)));
                        state.pending_mut().clear_files();
                    }
                    Err(kind) => {
                        log_failure(ActionKind::Upload, request_id, kind);
                        state.append(MessageRecord::notice(UPLOAD_FAILED_TEXT));
                    }
                }
            }
            Vec::new()
        }
        Msg::UrlSettled { request_id, result } => {
            if let Some(InFlight::UrlIngestion { url, .. }) =
                take_in_flight(&mut state, request_id, ActionKind::UrlIngestion)
            {
                match result {
                    Ok(()) => {
                        dc_info!("URL ingestion {} succeeded for {}", request_id, url);
                        state.append(MessageRecord::notice(url_success_text(&url)));
                        state.pending_mut().set_url_text(String::new());
                    }
                    Err(kind) => {
                        log_failure(ActionKind::UrlIngestion, request_id, kind);
                        state.append(MessageRecord::notice(URL_FAILED_TEXT));
                    }
                }
            }
            Vec::new()
        }
        Msg::QuerySettled { request_id, result } => {
            if take_in_flight(&mut state, request_id, ActionKind::Query).is_some() {
                settle_query(&mut state, request_id, result);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn submit_upload(state: &mut AppState) -> Vec<Effect> {
    if reject_if_busy(state, ActionKind::Upload) {
        return Vec::new();
    }
    let files = state.pending().files().to_vec();
    if files.is_empty() {
        return Vec::new();
    }
    let file_count = files.len();
    let request_id = state.begin(|request_id| InFlight::Upload {
        request_id,
        file_count,
    });
    dc_info!("Dispatching upload {} with {} files", request_id, file_count);
    vec![Effect::IngestDocuments { request_id, files }]
}

fn submit_url(state: &mut AppState) -> Vec<Effect> {
    if reject_if_busy(state, ActionKind::UrlIngestion) {
        return Vec::new();
    }
    let url = state.pending().url_text().to_owned();
    if url.is_empty() {
        return Vec::new();
    }
    let request_id = state.begin(|request_id| InFlight::UrlIngestion {
        request_id,
        url: url.clone(),
    });
    dc_info!("Dispatching url ingestion {} url={}", request_id, url);
    vec![Effect::IngestUrl { request_id, url }]
}

fn submit_query(state: &mut AppState) -> Vec<Effect> {
    if reject_if_busy(state, ActionKind::Query) {
        return Vec::new();
    }
    if state.pending().query_text().trim().is_empty() {
        return Vec::new();
    }
    // Echo and free the field before the backend sees the question.
    let query = state.pending_mut().take_query_text();
    state.append(MessageRecord::user(query.clone()));
    let request_id = state.begin(|request_id| InFlight::Query { request_id });
    dc_info!("Dispatching query {} query_len={}", request_id, query.len());
    vec![Effect::Ask { request_id, query }]
}

fn settle_query(state: &mut AppState, request_id: RequestId, result: Result<Value, FailureKind>) {
    match result {
        Ok(payload) => {
            dc_info!("Query {} answered", request_id);
            state.append(MessageRecord::answer(answer_text(&payload)));
        }
        Err(kind) => {
            log_failure(ActionKind::Query, request_id, kind);
            state.append(MessageRecord::notice(QUERY_FAILED_TEXT));
        }
    }
}

fn reject_if_busy(state: &AppState, action: ActionKind) -> bool {
    match state.in_flight() {
        Some(in_flight) => {
            dc_debug!(
                "Rejecting {} trigger: {} {} still in flight",
                action,
                in_flight.kind(),
                in_flight.request_id()
            );
            true
        }
        None => false,
    }
}

fn take_in_flight(
    state: &mut AppState,
    request_id: RequestId,
    expected: ActionKind,
) -> Option<InFlight> {
    let matches = state
        .in_flight()
        .is_some_and(|in_flight| in_flight.kind() == expected);
    let taken = if matches { state.settle(request_id) } else { None };
    if taken.is_none() {
        dc_warn!(
            "Ignoring {} settle for request {} that is not in flight",
            expected,
            request_id
        );
    }
    taken
}

fn log_failure(action: ActionKind, request_id: RequestId, kind: FailureKind) {
    dc_warn!("{} {} failed: {}", action, request_id, kind);
}
