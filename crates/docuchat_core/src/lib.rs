//! DocuChat core: pure conversation state machine and view-model helpers.
//!
//! Nothing in this crate performs IO. User actions and gateway results enter
//! as [`Msg`] values, [`update`] folds them into [`AppState`], and any backend
//! work leaves as [`Effect`] values for the platform layer to execute.
mod answer;
mod effect;
mod msg;
mod pending;
mod state;
mod theme;
mod transcript;
mod update;
mod view_model;

pub use answer::{answer_text, ANSWER_FIELD};
pub use effect::Effect;
pub use msg::Msg;
pub use pending::{FileSource, PendingFile, PendingSelection};
pub use state::{ActionKind, AppState, FailureKind, InFlight, RequestId};
pub use theme::{AccentPalette, Palette, Rgb, ThemeConfig};
pub use transcript::{MessageRecord, Origin, Rendering, Transcript};
pub use update::{
    update, upload_success_text, url_success_text, QUERY_FAILED_TEXT, UPLOAD_FAILED_TEXT,
    URL_FAILED_TEXT,
};
pub use view_model::{present, AppViewModel, MessageView, ViewItem, PROCESSING_TEXT};
