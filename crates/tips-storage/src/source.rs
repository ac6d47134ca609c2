//! Source trait, raw document records and error types.
//!
//! Provides the core [`Source`] trait for abstracting document loading,
//! along with [`StorageError`] for failures that prevent listing documents at
//! all and [`LoadError`] for failures that belong to one document.
//!
//! # Document Ids
//!
//! Every raw document carries an `id` derived from its location, not from
//! its metadata:
//! - `024.md` -> `"024"`
//! - `tips/cpp/061.md` -> `"tips/cpp/061"`
//!
//! Ids are `/`-separated on every platform so that builds are reproducible.

use std::path::PathBuf;

use crate::front_matter::{MalformedReason, split_front_matter};

/// A document split into its metadata block and body.
///
/// Nothing inside the metadata block has been interpreted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    /// Stable identifier derived from the source location.
    pub id: String,
    /// Where the document was read from (for diagnostics).
    pub source_path: PathBuf,
    /// Text between the opening and closing delimiters.
    pub front_matter: String,
    /// Everything after the closing delimiter, verbatim.
    pub body: String,
}

impl RawDocument {
    /// Split document text into a raw record.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Malformed`] if the metadata delimiters are missing.
    pub fn parse(
        id: impl Into<String>,
        source_path: impl Into<PathBuf>,
        content: &str,
    ) -> Result<Self, LoadError> {
        let id = id.into();
        let source_path = source_path.into();
        match split_front_matter(content) {
            Ok((front_matter, body)) => Ok(Self {
                id,
                source_path,
                front_matter: front_matter.to_owned(),
                body: body.to_owned(),
            }),
            Err(reason) => Err(LoadError::Malformed {
                id,
                path: source_path,
                reason,
            }),
        }
    }
}

/// Failure to load one document.
///
/// The remaining documents of a source can still be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The metadata block's delimiters are missing.
    #[error("{reason}")]
    Malformed {
        /// Id of the offending document.
        id: String,
        /// Source path of the offending document.
        path: PathBuf,
        /// Which delimiter is missing.
        reason: MalformedReason,
    },
    /// The document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Id of the offending document.
        id: String,
        /// Source path of the offending document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Id of the document that failed to load.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Malformed { id, .. } | Self::Io { id, .. } => id,
        }
    }
}

/// Semantic error categories for source-level failures.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Source location does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Source location is not usable (e.g. a file where a directory is expected).
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Error that prevents a source from listing its documents.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Lazy, finite sequence of raw documents in id order.
pub type Documents<'a> = Box<dyn Iterator<Item = Result<RawDocument, LoadError>> + 'a>;

/// Abstraction over where tip documents are stored.
///
/// Calling [`documents`](Source::documents) again starts a fresh pass over
/// the source and yields the same records for unchanged input.
pub trait Source {
    /// List the source and return an iterator that loads each document.
    ///
    /// Document content is read as the iterator advances. Per-document
    /// failures are yielded as items so the caller can collect all of them.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the source itself cannot be listed.
    fn documents(&self) -> Result<Documents<'_>, StorageError>;
}
