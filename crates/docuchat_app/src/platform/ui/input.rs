use docuchat_core::{Msg, PendingFile};

pub const HELP_TEXT: &str = "\
Commands:
  /files <path>...   select documents (replaces the current selection)
  /remove <index>    drop one selected document
  /upload            upload the selected documents
  /url <address>     set the web page to ingest
  /ingest            ingest the web page
  /theme             toggle dark/light mode
  /help              show this help
  /quit              exit
Anything else is sent as a question.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Messages for the core, applied in order.
    Core(Vec<Msg>),
    Help,
    Quit,
    Invalid(String),
}

/// Parses one line typed by the user. `line` excludes the line terminator.
pub fn parse_line(line: &str) -> Command {
    if line.trim().is_empty() {
        return Command::Core(Vec::new());
    }
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Command::Core(vec![
            Msg::QueryInputChanged(line.to_owned()),
            Msg::QuerySubmitted,
        ]);
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    match name {
        "files" => Command::Core(vec![Msg::FilesSelected(
            args.split_whitespace().map(PendingFile::from_path).collect(),
        )]),
        "remove" => match args.parse::<usize>() {
            Ok(index) => Command::Core(vec![Msg::FileRemoved(index)]),
            Err(_) => Command::Invalid(format!("'/remove' needs a file index, got '{args}'")),
        },
        "upload" => Command::Core(vec![Msg::UploadClicked]),
        "url" => Command::Core(vec![Msg::UrlInputChanged(args.to_owned())]),
        "ingest" => Command::Core(vec![Msg::UrlSubmitted]),
        "theme" => Command::Core(vec![Msg::DarkModeToggled]),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '/{other}', try /help")),
    }
}

/// Whether the message asks the core to start a backend request.
fn is_trigger(msg: &Msg) -> bool {
    matches!(msg, Msg::UploadClicked | Msg::UrlSubmitted | Msg::QuerySubmitted)
}

/// Drops what a busy core would reject and says so.
///
/// A typed question loses its text too, so it does not sit unseen in the
/// question field. Plain edits such as `/url` still go through.
pub fn hold_back_while_busy(msgs: Vec<Msg>) -> (Vec<Msg>, Option<String>) {
    if !msgs.iter().any(is_trigger) {
        return (msgs, None);
    }
    let asks_question = msgs.contains(&Msg::QuerySubmitted);
    let kept = msgs
        .into_iter()
        .filter(|msg| !is_trigger(msg) && !matches!(msg, Msg::QueryInputChanged(_)))
        .collect();
    let notice = if asks_question {
        "A request is still in progress; your question was not sent."
    } else {
        "A request is still in progress; please wait."
    };
    (kept, Some(notice.to_string()))
}
