//! Document-level validation errors.
//!
//! Every failure the pipeline reports is tied to the id of the document that
//! caused it, so a single build can list all broken documents at once.

use std::path::PathBuf;

/// What is wrong with a document.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The metadata block is missing its delimiters or is not a YAML mapping.
    #[error("{reason}")]
    MalformedDocument {
        /// Human-readable reason.
        reason: String,
    },
    /// A required field is absent, null or blank.
    #[error("required field `{field}` is missing")]
    MissingField {
        /// Field name.
        field: &'static str,
    },
    /// A field has a value that cannot be coerced to its type.
    #[error("field `{field}` must be {expected}, found {found}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// What was expected.
        expected: &'static str,
        /// What was found.
        found: String,
    },
    /// Two indexed documents declare the same permalink.
    #[error("permalink `{permalink}` is declared by both `{first_id}` and `{second_id}`")]
    DuplicatePermalink {
        /// Normalized permalink.
        permalink: String,
        /// Document that comes first in `(order, id)` sequence.
        first_id: String,
        /// Document that comes second.
        second_id: String,
    },
    /// Two source files map to the same document id.
    #[error("id is shared by {} and {}", .first_path.display(), .second_path.display())]
    DuplicateId {
        /// First source file.
        first_path: PathBuf,
        /// Second source file.
        second_path: PathBuf,
    },
    /// The document could not be read.
    #[error("{reason}")]
    Unreadable {
        /// Human-readable reason.
        reason: String,
    },
}

impl ErrorKind {
    /// Stable name of the error kind, used in CLI output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MalformedDocument { .. } => "MalformedDocumentError",
            Self::MissingField { .. } => "MissingFieldError",
            Self::TypeMismatch { .. } => "TypeMismatchError",
            Self::DuplicatePermalink { .. } => "DuplicatePermalinkError",
            Self::DuplicateId { .. } => "DuplicateIdError",
            Self::Unreadable { .. } => "ReadError",
        }
    }
}

/// A failure attributed to one document.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{id}: {}: {kind}", .kind.name())]
pub struct ValidationError {
    /// Id of the offending document.
    pub id: String,
    /// What is wrong.
    pub kind: ErrorKind,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}
