use docuchat_core::{AppViewModel, MessageView, Origin, Rendering, Rgb, ViewItem, PROCESSING_TEXT};

const USER_PREFIX: &str = "you> ";
const SYSTEM_PREFIX: &str = "docuchat> ";
const CONTINUATION: &str = "    ";
const WELCOME_TEXT: &str =
    "Upload documents or ingest a web page, then ask a question. /help lists commands.";

/// Turns successive view models into terminal lines, printing only what
/// changed since the previous render. The transcript is append-only, so
/// tracking how many messages were printed is enough.
pub struct TerminalRenderer {
    color: bool,
    shown_messages: usize,
    shown_busy: bool,
    shown_files: Vec<String>,
    shown_dark_mode: Option<bool>,
    welcomed: bool,
}

impl TerminalRenderer {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            shown_messages: 0,
            shown_busy: false,
            shown_files: Vec::new(),
            shown_dark_mode: None,
            welcomed: false,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let palette = view.palette;
        let mut lines = Vec::new();

        if view.is_empty_conversation && !self.welcomed {
            lines.push(self.paint(WELCOME_TEXT, palette.muted));
            self.welcomed = true;
        }

        if let Some(previous) = self.shown_dark_mode {
            if previous != view.dark_mode {
                let mode = if view.dark_mode { "dark" } else { "light" };
                lines.push(self.paint(&format!("Switched to {mode} mode."), palette.muted));
            }
        }
        self.shown_dark_mode = Some(view.dark_mode);

        if view.pending_files != self.shown_files {
            lines.push(self.paint(&files_line(&view.pending_files), palette.muted));
            self.shown_files = view.pending_files.clone();
        }

        let messages: Vec<&MessageView> = view
            .items
            .iter()
            .filter_map(|item| match item {
                ViewItem::Message(message) => Some(message),
                ViewItem::Processing => None,
            })
            .collect();
        for message in messages.iter().skip(self.shown_messages) {
            lines.extend(self.message_lines(message, view));
        }
        self.shown_messages = messages.len();

        let processing = view.items.contains(&ViewItem::Processing);
        if processing && !self.shown_busy {
            lines.push(self.paint(&format!("... {PROCESSING_TEXT}"), palette.accent));
        }
        self.shown_busy = processing;

        lines
    }

    fn message_lines(&self, message: &MessageView, view: &AppViewModel) -> Vec<String> {
        let (prefix, color) = match message.origin {
            Origin::User => (USER_PREFIX, view.palette.user_message),
            Origin::System => (SYSTEM_PREFIX, view.palette.system_message),
        };
        match message.rendering {
            Rendering::Plain => {
                // One unit; keep its own line breaks, aligned under the prefix.
                let text = message.units.concat();
                text.split('\n')
                    .enumerate()
                    .map(|(index, line)| {
                        let lead = if index == 0 { prefix } else { CONTINUATION };
                        format!(
                            "{}{}",
                            self.paint(lead, view.palette.accent),
                            self.paint(line, color)
                        )
                    })
                    .collect()
            }
            Rendering::Structured => {
                let mut lines = vec![self.paint(prefix.trim_end(), view.palette.accent)];
                lines.extend(
                    message
                        .units
                        .iter()
                        .map(|unit| format!("{CONTINUATION}{}", self.paint(unit, color))),
                );
                lines
            }
        }
    }

    fn paint(&self, text: &str, rgb: Rgb) -> String {
        if self.color && !text.is_empty() {
            let Rgb(r, g, b) = rgb;
            format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
        } else {
            text.to_owned()
        }
    }
}

fn files_line(files: &[String]) -> String {
    if files.is_empty() {
        return "No documents selected.".to_string();
    }
    let listed: Vec<String> = files
        .iter()
        .enumerate()
        .map(|(index, name)| format!("[{index}] {name}"))
        .collect();
    format!("{} file(s) selected: {}", files.len(), listed.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docuchat_core::{update, AppState, FileSource, Msg, PendingFile};
    use serde_json::json;
    use std::sync::Arc;

    fn apply(state: AppState, msgs: Vec<Msg>) -> AppState {
        msgs.into_iter().fold(state, |state, msg| update(state, msg).0)
    }

    #[test]
    fn prints_only_new_output() {
        let mut renderer = TerminalRenderer::new(false);
        let state = AppState::new();
        assert_eq!(renderer.render(&state.view()), vec![WELCOME_TEXT.to_string()]);
        assert!(renderer.render(&state.view()).is_empty());

        let state = apply(
            state,
            vec![Msg::QueryInputChanged("Hi?".into()), Msg::QuerySubmitted],
        );
        assert_eq!(
            renderer.render(&state.view()),
            vec![
                "you> Hi?".to_string(),
                format!("... {PROCESSING_TEXT}"),
            ]
        );

        let state = apply(
            state,
            vec![Msg::QuerySettled {
                request_id: 1,
                result: Ok(json!({ "output_text": "Line A\nLine B" })),
            }],
        );
        assert_eq!(
            renderer.render(&state.view()),
            vec![
                "docuchat>".to_string(),
                "    Line A".to_string(),
                "    Line B".to_string(),
            ]
        );
    }

    #[test]
    fn lists_pending_files_when_selection_changes() {
        let mut renderer = TerminalRenderer::new(false);
        let state = AppState::new();
        renderer.render(&state.view());

        let file = |name: &str| PendingFile::new(name, FileSource::Bytes(Arc::from(&b"x"[..])));
        let state = apply(state, vec![Msg::FilesSelected(vec![file("a.pdf"), file("b.pdf")])]);
        assert_eq!(
            renderer.render(&state.view()),
            vec!["2 file(s) selected: [0] a.pdf, [1] b.pdf".to_string()]
        );

        let state = apply(state, vec![Msg::FileRemoved(0), Msg::FileRemoved(0)]);
        assert_eq!(
            renderer.render(&state.view()),
            vec!["No documents selected.".to_string()]
        );
    }

    #[test]
    fn colour_uses_palette_escape_codes() {
        let renderer = TerminalRenderer::new(true);
        assert_eq!(
            renderer.paint("x", Rgb(1, 2, 3)),
            "\x1b[38;2;1;2;3mx\x1b[0m"
        );
        assert_eq!(renderer.paint("", Rgb(1, 2, 3)), "");
    }
}
