use std::path::PathBuf;
use std::sync::Arc;

/// Opaque handle to the raw bytes of a selected file.
///
/// The core never reads it; the transport resolves it at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub display_name: String,
    pub source: FileSource,
}

impl PendingFile {
    pub fn new(display_name: impl Into<String>, source: FileSource) -> Self {
        Self {
            display_name: display_name.into(),
            source,
        }
    }

    /// Builds an entry from a local path, using the file name for display.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            display_name,
            source: FileSource::Path(path),
        }
    }
}

/// Input not yet confirmed by a backend call: chosen files and the two
/// text fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingSelection {
    files: Vec<PendingFile>,
    url_text: String,
    query_text: String,
}

impl PendingSelection {
    /// Replaces the current selection; never merges.
    pub fn select_files(&mut self, files: Vec<PendingFile>) {
        self.files = files;
    }

    /// Removes the entry at `index`. Returns false and leaves the set
    /// untouched when the index is out of range.
    pub fn remove_file(&mut self, index: usize) -> bool {
        if index < self.files.len() {
            self.files.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_url_text(&mut self, text: impl Into<String>) {
        self.url_text = text.into();
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn url_text(&self) -> &str {
        &self.url_text
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub(crate) fn clear_files(&mut self) {
        self.files.clear();
    }

    pub(crate) fn take_query_text(&mut self) -> String {
        std::mem::take(&mut self.query_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> PendingFile {
        PendingFile::new(name, FileSource::Bytes(Arc::from(name.as_bytes())))
    }

    #[test]
    fn select_replaces_previous_selection() {
        let mut pending = PendingSelection::default();
        pending.select_files(vec![file("a.pdf"), file("b.pdf")]);
        pending.select_files(vec![file("c.pdf")]);

        let names: Vec<_> = pending.files().iter().map(|f| f.display_name.as_str()).collect();
        assert_eq!(names, vec!["c.pdf"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut pending = PendingSelection::default();
        pending.select_files(vec![file("a.pdf")]);

        assert!(!pending.remove_file(1));
        assert!(!pending.remove_file(usize::MAX));
        assert_eq!(pending.files().len(), 1);

        assert!(pending.remove_file(0));
        assert!(pending.files().is_empty());
    }

    #[test]
    fn from_path_uses_file_name() {
        let entry = PendingFile::from_path("/tmp/reports/q3.pdf");
        assert_eq!(entry.display_name, "q3.pdf");
        assert_eq!(entry.source, FileSource::Path(PathBuf::from("/tmp/reports/q3.pdf")));
    }

    #[test]
    fn empty_text_is_accepted() {
        let mut pending = PendingSelection::default();
        pending.set_url_text("https://example.com");
        pending.set_url_text("");
        assert_eq!(pending.url_text(), "");
    }
}
