/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    /// Success and failure notices as well as backend answers.
    System,
}

/// How the text of a record is laid out for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// Shown verbatim, whitespace and line breaks preserved.
    Plain,
    /// Split into one paragraph per newline-delimited segment.
    Structured,
}

/// A single immutable conversation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    text: String,
    origin: Origin,
    rendering: Rendering,
}

impl MessageRecord {
    pub(crate) fn new(text: impl Into<String>, origin: Origin, rendering: Rendering) -> Self {
        Self {
            text: text.into(),
            origin,
            rendering,
        }
    }

    pub(crate) fn user(text: impl Into<String>) -> Self {
        Self::new(text, Origin::User, Rendering::Plain)
    }

    pub(crate) fn notice(text: impl Into<String>) -> Self {
        Self::new(text, Origin::System, Rendering::Plain)
    }

    pub(crate) fn answer(text: impl Into<String>) -> Self {
        Self::new(text, Origin::System, Rendering::Structured)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn rendering(&self) -> Rendering {
        self.rendering
    }
}

/// Append-only log of message records for the lifetime of the session.
///
/// Only the controller appends; everyone else gets shared slices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    records: Vec<MessageRecord>,
}

impl Transcript {
    pub(crate) fn append(&mut self, record: MessageRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&MessageRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
