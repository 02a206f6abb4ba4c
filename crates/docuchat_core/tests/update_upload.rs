use std::sync::{Arc, Once};

use docuchat_core::{
    update, AppState, Effect, FailureKind, FileSource, Msg, Origin, PendingFile, Rendering,
    UPLOAD_FAILED_TEXT,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(docuchat_logging::initialize_for_tests);
}

fn files(names: &[&str]) -> Vec<PendingFile> {
    names
        .iter()
        .map(|name| PendingFile::new(*name, FileSource::Bytes(Arc::from(name.as_bytes()))))
        .collect()
}

fn select_and_upload(names: &[&str]) -> (AppState, Vec<Effect>) {
    let (state, _) = update(AppState::new(), Msg::FilesSelected(files(names)));
    update(state, Msg::UploadClicked)
}

#[test]
fn upload_of_two_files_succeeds_and_clears_selection() {
    init_logging();
    let (state, effects) = select_and_upload(&["a.pdf", "b.pdf"]);

    assert!(state.is_busy());
    assert_eq!(
        effects,
        vec![Effect::IngestDocuments {
            request_id: 1,
            files: files(&["a.pdf", "b.pdf"]),
        }]
    );
    assert!(state.transcript().is_empty());

    let (state, effects) = update(
        state,
        Msg::UploadSettled {
            request_id: 1,
            result: Ok(()),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.is_busy());
    assert!(state.pending().files().is_empty());
    assert_eq!(state.transcript().len(), 1);
    let record = &state.transcript().records()[0];
    assert_eq!(record.text(), "Successfully uploaded 2 documents.");
    assert_eq!(record.origin(), Origin::System);
    assert_eq!(record.rendering(), Rendering::Plain);
}

#[test]
fn success_text_is_pluralized_by_count_at_dispatch() {
    init_logging();
    for (names, expected) in [
        (vec!["a.pdf"], "Successfully uploaded 1 document."),
        (
            vec!["a.pdf", "b.pdf", "c.pdf"],
            "Successfully uploaded 3 documents.",
        ),
    ] {
        let (state, _) = select_and_upload(&names);
        // Changing the selection mid-flight does not change the reported count.
        let (state, _) = update(state, Msg::FileRemoved(0));
        let (state, _) = update(
            state,
            Msg::UploadSettled {
                request_id: 1,
                result: Ok(()),
            },
        );
        assert_eq!(state.transcript().records()[0].text(), expected);
    }
}

#[test]
fn failed_upload_keeps_selection_for_retry() {
    init_logging();
    let (state, _) = select_and_upload(&["a.pdf", "b.pdf"]);
    let (state, _) = update(
        state,
        Msg::UploadSettled {
            request_id: 1,
            result: Err(FailureKind::NetworkUnavailable),
        },
    );

    assert!(!state.is_busy());
    assert_eq!(state.pending().files().len(), 2);
    assert_eq!(state.transcript().len(), 1);
    let record = &state.transcript().records()[0];
    assert_eq!(record.text(), UPLOAD_FAILED_TEXT);
    assert_eq!(record.origin(), Origin::System);
    assert_eq!(record.rendering(), Rendering::Plain);

    let (state, effects) = update(state, Msg::UploadClicked);
    assert!(state.is_busy());
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].request_id(), 2);
}

#[test]
fn upload_with_empty_selection_is_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::UploadClicked);

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn upload_while_busy_is_rejected() {
    init_logging();
    let (state, _) = select_and_upload(&["a.pdf"]);
    let before_len = state.transcript().len();

    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(effects.is_empty());
    assert_eq!(state.transcript().len(), before_len);
    assert_eq!(state.in_flight().map(|f| f.request_id()), Some(1));
}

#[test]
fn selection_replaces_and_removal_is_positional() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesSelected(files(&["a.pdf", "b.pdf"])));
    let (state, _) = update(state, Msg::FilesSelected(files(&["c.pdf", "d.pdf", "e.pdf"])));
    let (state, _) = update(state, Msg::FileRemoved(1));

    assert_eq!(state.view().pending_files, vec!["c.pdf", "e.pdf"]);
}

#[test]
fn out_of_range_removal_leaves_selection_unchanged() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::FilesSelected(files(&["a.pdf"])));
    assert!(state.consume_dirty());

    let (mut next, effects) = update(state.clone(), Msg::FileRemoved(5));

    assert!(effects.is_empty());
    assert_eq!(next.pending(), state.pending());
    assert!(!next.consume_dirty());
}
