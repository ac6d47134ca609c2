//! Mock source implementation for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::source::{Documents, RawDocument, Source, StorageError};

/// Mock source for testing.
///
/// Stores document text in memory, keyed by id. Documents are yielded in id
/// order, like [`FsSource`](crate::FsSource).
///
/// # Example
///
/// ```ignore
/// use tips_storage::{MockSource, Source};
///
/// let source = MockSource::new()
///     .with_document("024", "---\ntitle: Tip 24\n---\nBody");
///
/// let docs: Vec<_> = source.documents().unwrap().collect();
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    documents: BTreeMap<String, String>,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given id and full text (front matter + body).
    ///
    /// Adding the same id twice replaces the earlier text.
    #[must_use]
    pub fn with_document(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(id.into(), content.into());
        self
    }
}

impl Source for MockSource {
    fn documents(&self) -> Result<Documents<'_>, StorageError> {
        Ok(Box::new(self.documents.iter().map(|(id, content)| {
            RawDocument::parse(id.as_str(), PathBuf::from(format!("{id}.md")), content)
        })))
    }
}
