//! Build pipeline and output artifact.
//!
//! [`Site::build`] drives one run: load every document from a [`Source`],
//! validate its metadata, build the [`Index`] and derive [`Navigation`].
//! Failures are collected across all stages so one run reports every broken
//! document. A build with any failure produces no site.

use std::time::Instant;

use serde::Serialize;
use tips_storage::{LoadError, Source, StorageError};

use crate::document::Document;
use crate::error::{ErrorKind, ValidationError};
use crate::index::{Index, IndexOptions};
use crate::metadata;
use crate::navigation::Navigation;

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Options for [`Site::build`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Index documents with `published: false` too.
    pub include_drafts: bool,
}

/// Every document-level failure found during a build.
#[derive(Debug, thiserror::Error)]
#[error("{} document error(s)", .errors.len())]
pub struct BuildFailure {
    /// Failures in the order they were found.
    pub errors: Vec<ValidationError>,
}

/// Error returned by [`Site::build`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The source itself could not be listed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// One or more documents failed.
    #[error(transparent)]
    Failed(#[from] BuildFailure),
}

/// Result of a successful build.
#[derive(Debug)]
pub struct Site {
    index: Index,
    navigation: Navigation,
}

/// Serialized form of a [`Site`], consumed by the renderer.
#[derive(Debug, Serialize)]
pub struct Artifact<'a> {
    /// Indexed documents in sequence order.
    pub documents: &'a [Document],
    /// Side navigation and per-page links.
    pub navigation: &'a Navigation,
}

impl Site {
    /// Run the pipeline over every document in `source`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Storage`] if the source cannot be listed, and
    /// [`BuildError::Failed`] with every document error otherwise.
    pub fn build(source: &dyn Source, options: &BuildOptions) -> Result<Self, BuildError> {
        let start = Instant::now();
        let mut errors = Vec::new();
        let mut documents = Vec::new();
        let mut loaded = 0usize;

        for item in source.documents()? {
            loaded += 1;
            let raw = match item {
                Ok(raw) => raw,
                Err(err) => {
                    errors.push(load_failure(err));
                    continue;
                }
            };
            match metadata::validate(&raw) {
                Ok(doc) => documents.push(doc),
                Err(doc_errors) => errors.extend(doc_errors),
            }
        }

        let index_options = IndexOptions {
            include_drafts: options.include_drafts,
        };
        let index = match Index::build(documents, &index_options) {
            Ok(index) => Some(index),
            Err(index_errors) => {
                errors.extend(index_errors);
                None
            }
        };

        let index = match index {
            Some(index) if errors.is_empty() => index,
            _ => {
                tracing::info!(
                    loaded,
                    errors = errors.len(),
                    elapsed_ms = elapsed_ms(start),
                    "Build failed"
                );
                return Err(BuildFailure { errors }.into());
            }
        };

        let navigation = Navigation::from_index(&index);

        tracing::info!(
            loaded,
            indexed = index.len(),
            excluded_drafts = index.excluded_drafts(),
            elapsed_ms = elapsed_ms(start),
            "Built site"
        );

        Ok(Self { index, navigation })
    }

    /// The document index.
    #[must_use]
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Derived navigation.
    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Borrowed artifact view of this site.
    #[must_use]
    pub fn artifact(&self) -> Artifact<'_> {
        Artifact {
            documents: self.index.documents(),
            navigation: &self.navigation,
        }
    }

    /// Pretty-printed JSON artifact with a trailing newline.
    ///
    /// The output is byte-identical for identical inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(&self.artifact())?;
        json.push('\n');
        Ok(json)
    }
}

/// Attribute a loader failure to its document.
fn load_failure(err: LoadError) -> ValidationError {
    match err {
        LoadError::Malformed { id, reason, .. } => ValidationError::new(
            id,
            ErrorKind::MalformedDocument {
                reason: reason.to_string(),
            },
        ),
        LoadError::Io { id, path, source } => ValidationError::new(
            id,
            ErrorKind::Unreadable {
                reason: format!("failed to read {}: {source}", path.display()),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tips_storage::MockSource;

    use super::*;

    fn tip(order: &str, permalink: &str) -> String {
        format!(
            "---\ntitle: \"Tip of the Week #{n}\"\nlayout: tips\nsidenav: side-nav-tips.html\npublished: true\npermalink: {permalink}\ntype: markdown\norder: \"{order}\"\n---\n\nBody of tip {n}.\n",
            n = order.trim_start_matches('0'),
        )
    }

    fn failures(result: Result<Site, BuildError>) -> Vec<ValidationError> {
        match result {
            Err(BuildError::Failed(failure)) => failure.errors,
            other => panic!("expected document failures, got {other:?}"),
        }
    }

    fn three_tips() -> MockSource {
        MockSource::new()
            .with_document("134", tip("134", "tips/134"))
            .with_document("024", tip("024", "tips/24"))
            .with_document("061", tip("061", "tips/61"))
    }

    #[test]
    fn test_build_sequence() {
        let site = Site::build(&three_tips(), &BuildOptions::default()).unwrap();

        let permalinks: Vec<_> = site
            .index()
            .iter()
            .map(|d| d.permalink.as_str())
            .collect();
        assert_eq!(permalinks, vec!["/tips/24", "/tips/61", "/tips/134"]);

        let nav = site.navigation();
        assert_eq!(nav.pages[0].previous, None);
        assert_eq!(
            nav.pages[0].next.as_ref().map(|l| l.permalink.as_str()),
            Some("/tips/61")
        );
        assert_eq!(nav.pages[2].next, None);
    }

    #[test]
    fn test_json_is_deterministic() {
        let first = Site::build(&three_tips(), &BuildOptions::default())
            .unwrap()
            .to_json()
            .unwrap();
        let second = Site::build(&three_tips(), &BuildOptions::default())
            .unwrap()
            .to_json()
            .unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with("}\n"));
    }

    #[test]
    fn test_pass_through_fields_round_trip() {
        let source = MockSource::new().with_document(
            "024",
            "---\ntitle: T\npermalink: /tips/24\norder: 24\nlayout: tips\ntype: markdown\nsidenav: side-nav-tips.html\nauthors: [alice]\n---\nBody\n",
        );
        let site = Site::build(&source, &BuildOptions::default()).unwrap();

        let json: serde_json::Value = serde_json::from_str(&site.to_json().unwrap()).unwrap();
        let doc = &json["documents"][0];

        assert_eq!(doc["layout"], "tips");
        assert_eq!(doc["type"], "markdown");
        assert_eq!(doc["sidenav"], "side-nav-tips.html");
        assert_eq!(doc["extra"]["authors"], serde_json::json!(["alice"]));
        assert_eq!(doc["body"], "Body\n");
        assert_eq!(doc["order"], 24);
    }

    #[test]
    fn test_artifact_shape() {
        let source = MockSource::new().with_document("024", tip("024", "/tips/24"));
        let site = Site::build(&source, &BuildOptions::default()).unwrap();

        let json = serde_json::to_value(site.artifact()).unwrap();

        assert_eq!(
            json["navigation"]["sidenav"],
            serde_json::json!([{
                "id": "024",
                "title": "Tip of the Week #24",
                "permalink": "/tips/24",
                "order": 24,
            }])
        );
        assert_eq!(
            json["navigation"]["pages"],
            serde_json::json!([{
                "id": "024",
                "permalink": "/tips/24",
                "position": 0,
                "total": 1,
            }])
        );
    }

    #[test]
    fn test_unpublished_excluded_without_failing() {
        let source = three_tips().with_document(
            "099",
            "---\ntitle: Draft\npermalink: /tips/99\norder: 99\npublished: false\n---\n",
        );

        let site = Site::build(&source, &BuildOptions::default()).unwrap();
        assert_eq!(site.index().len(), 3);
        assert!(site.navigation().descriptor("099").is_none());

        let with_drafts = Site::build(
            &source,
            &BuildOptions {
                include_drafts: true,
            },
        )
        .unwrap();
        assert_eq!(with_drafts.index().len(), 4);
    }

    #[test]
    fn test_duplicate_permalink_fails() {
        let source = MockSource::new()
            .with_document("061", tip("061", "tips/61"))
            .with_document("061-copy", tip("062", "tips/61"));

        let errors = failures(Site::build(&source, &BuildOptions::default()));

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "061-copy: DuplicatePermalinkError: permalink `/tips/61` is declared by both `061` and `061-copy`"
        );
    }

    #[test]
    fn test_all_failures_reported_in_one_pass() {
        let source = MockSource::new()
            .with_document("001", "no front matter")
            .with_document("002", "---\npermalink: /a\norder: 2\n---\n")
            .with_document("003", "---\ntitle: C\npermalink: /c\norder: \"x\"\n---\n")
            .with_document("004", "---\ntitle: D\npermalink: /d\norder: 4\n---\n")
            .with_document("005", "---\ntitle: E\npermalink: /d\norder: 5\n---\n");

        let errors = failures(Site::build(&source, &BuildOptions::default()));

        let summary: Vec<_> = errors
            .iter()
            .map(|e| (e.id.as_str(), e.kind.name()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("001", "MalformedDocumentError"),
                ("002", "MissingFieldError"),
                ("003", "TypeMismatchError"),
                ("005", "DuplicatePermalinkError"),
            ]
        );
    }

    #[test]
    fn test_empty_source_builds_empty_site() {
        let site = Site::build(&MockSource::new(), &BuildOptions::default()).unwrap();

        assert!(site.index().is_empty());
        assert!(site.navigation().is_empty());
        assert_eq!(
            site.to_json().unwrap(),
            "{\n  \"documents\": [],\n  \"navigation\": {\n    \"sidenav\": [],\n    \"pages\": []\n  }\n}\n"
        );
    }

    #[test]
    fn test_build_failure_display() {
        let failure = BuildFailure {
            errors: vec![ValidationError::new(
                "024",
                ErrorKind::MissingField { field: "title" },
            )],
        };
        assert_eq!(failure.to_string(), "1 document error(s)");
    }
}
