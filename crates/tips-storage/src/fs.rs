//! Filesystem source implementation.
//!
//! Provides [`FsSource`] for loading tip documents from a local content
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::scanner::{DocumentRef, Scanner};
use crate::source::{Documents, LoadError, RawDocument, Source, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default document extensions.
const DEFAULT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Filesystem source.
///
/// Walks a content directory recursively and loads every file with a
/// document extension. Listing happens when [`Source::documents`] is called;
/// each file is read only when the returned iterator reaches it.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use tips_storage::{FsSource, Source};
///
/// let source = FsSource::new(PathBuf::from("content"));
/// let loaded: Vec<_> = source.documents()?.collect();
/// ```
pub struct FsSource {
    /// Root directory for document storage.
    source_dir: PathBuf,
    /// Scanner for document discovery.
    scanner: Scanner,
}

impl FsSource {
    /// Create a new filesystem source with default extensions (`md`, `markdown`).
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let extensions: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect();
        Self::with_extensions(source_dir, &extensions)
    }

    /// Create a new filesystem source with custom document extensions.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing tip documents
    /// * `extensions` - File extensions without the dot (e.g., `["md"]`)
    #[must_use]
    pub fn with_extensions(source_dir: PathBuf, extensions: &[String]) -> Self {
        let scanner = Scanner::new(source_dir.clone(), extensions.to_vec());
        Self {
            source_dir,
            scanner,
        }
    }

    /// Root directory this source reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}

/// Read one referenced file and split it into a raw record.
fn load_document(doc_ref: DocumentRef) -> Result<RawDocument, LoadError> {
    let DocumentRef { id, path } = doc_ref;
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(source) => return Err(LoadError::Io { id, path, source }),
    };
    tracing::debug!(id = %id, path = %path.display(), "Loaded document");
    RawDocument::parse(id, path, &content)
}

impl Source for FsSource {
    fn documents(&self) -> Result<Documents<'_>, StorageError> {
        let refs = self
            .scanner
            .scan()
            .map_err(|e| e.with_backend(BACKEND))?;
        tracing::debug!(
            source_dir = %self.source_dir.display(),
            count = refs.len(),
            "Discovered documents"
        );
        Ok(Box::new(refs.into_iter().map(load_document)))
    }
}
