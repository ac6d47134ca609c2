//! Document discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the loading
//! phase (reading and splitting them). The Scanner only identifies files that
//! could be documents, returning lightweight references for `FsSource` to read.

use std::fs;
use std::path::{Path, PathBuf};

use crate::source::StorageError;

/// Reference to a document's source file.
///
/// Contains only the file location - no content is read at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// Document id (e.g., "024", "cpp/061")
    pub id: String,
    /// Path to the document file
    pub path: PathBuf,
}

/// Discovers document references by walking the filesystem.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    extensions: Vec<String>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory to scan
    /// * `extensions` - Document file extensions without the dot (e.g., "md")
    pub fn new(source_dir: PathBuf, extensions: Vec<String>) -> Self {
        Self {
            source_dir,
            extensions,
        }
    }

    /// Scan filesystem and return document references sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the source directory is missing, is not a
    /// directory, or one of its subdirectories cannot be listed.
    pub fn scan(&self) -> Result<Vec<DocumentRef>, StorageError> {
        if !self.source_dir.exists() {
            return Err(StorageError::not_found(&self.source_dir));
        }
        if !self.source_dir.is_dir() {
            return Err(
                StorageError::new(crate::StorageErrorKind::InvalidPath).with_path(&self.source_dir)
            );
        }

        let mut refs = Vec::new();
        self.scan_directory(&self.source_dir, "", &mut refs)?;
        refs.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));
        Ok(refs)
    }

    /// Collect documents in `dir_path`, recursing into subdirectories.
    fn scan_directory(
        &self,
        dir_path: &Path,
        id_prefix: &str,
        refs: &mut Vec<DocumentRef>,
    ) -> Result<(), StorageError> {
        let entries =
            fs::read_dir(dir_path).map_err(|e| StorageError::io(e, Some(dir_path.to_path_buf())))?;

        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(e, Some(dir_path.to_path_buf())))?;
            let path = entry.path();

            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::warn!(path = %path.display(), "Skipping entry with non UTF-8 name");
                continue;
            };

            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }

            // Symlinked directories are not followed
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                let child_prefix = join_id(id_prefix, &name);
                self.scan_directory(&path, &child_prefix, refs)?;
            } else if self.is_document(&path) {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                refs.push(DocumentRef {
                    id: join_id(id_prefix, &stem),
                    path,
                });
            }
        }

        Ok(())
    }

    /// Check the file extension against the configured list (case-insensitive).
    fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Join an id prefix and a path segment with `/`.
fn join_id(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}/{segment}")
    }
}
