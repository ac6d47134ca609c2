//! Ordered index of published documents.
//!
//! The index is an owned, immutable value built fresh on every run. Documents
//! are stored in a flat `Vec` in sequence order with `HashMap` lookups by id
//! and permalink:
//! - O(1) lookups by id and permalink
//! - iteration in `(order, id)` order
//!
//! Building is order-independent: the same set of documents yields the same
//! index regardless of the order they arrive in.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::document::Document;
use crate::error::{ErrorKind, ValidationError};
use crate::metadata::normalize_permalink;

/// Options controlling which documents enter the index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Keep documents with `published: false`.
    pub include_drafts: bool,
}

/// Immutable, ordered index of documents.
#[derive(Debug)]
pub struct Index {
    documents: Vec<Document>,
    by_id: HashMap<String, usize>,
    by_permalink: HashMap<String, usize>,
    excluded_drafts: usize,
}

impl Index {
    /// Build an index from validated documents.
    ///
    /// Unpublished documents are dropped unless `options.include_drafts` is
    /// set. The rest are sorted by `(order, id)`.
    ///
    /// # Errors
    ///
    /// Returns every `DuplicateId` and `DuplicatePermalink` conflict. For a
    /// permalink shared by several documents, each one after the first (in
    /// sequence order) gets an error naming the first.
    pub fn build(
        mut documents: Vec<Document>,
        options: &IndexOptions,
    ) -> Result<Self, Vec<ValidationError>> {
        documents.sort_by(|a, b| {
            a.sort_key()
                .cmp(&b.sort_key())
                .then_with(|| a.source_path.cmp(&b.source_path))
        });

        let mut errors = duplicate_ids(&documents);

        let total = documents.len();
        if !options.include_drafts {
            documents.retain(|doc| doc.published);
        }
        let excluded_drafts = total - documents.len();

        let mut by_permalink: HashMap<String, usize> = HashMap::with_capacity(documents.len());
        for (idx, doc) in documents.iter().enumerate() {
            match by_permalink.entry(doc.permalink.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(idx);
                }
                Entry::Occupied(entry) => {
                    let first = &documents[*entry.get()];
                    errors.push(ValidationError::new(
                        doc.id.as_str(),
                        ErrorKind::DuplicatePermalink {
                            permalink: doc.permalink.clone(),
                            first_id: first.id.clone(),
                            second_id: doc.id.clone(),
                        },
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let by_id = documents
            .iter()
            .enumerate()
            .map(|(idx, doc)| (doc.id.clone(), idx))
            .collect();

        tracing::debug!(
            documents = documents.len(),
            excluded_drafts,
            "Built index"
        );

        Ok(Self {
            documents,
            by_id,
            by_permalink,
            excluded_drafts,
        })
    }

    /// Documents in sequence order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Iterate documents in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of unpublished documents left out of the index.
    #[must_use]
    pub fn excluded_drafts(&self) -> usize {
        self.excluded_drafts
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&idx| &self.documents[idx])
    }

    /// Look up a document by permalink.
    ///
    /// The permalink is normalized first, so `tips/61/` finds `/tips/61`.
    #[must_use]
    pub fn by_permalink(&self, permalink: &str) -> Option<&Document> {
        let permalink = normalize_permalink(permalink).ok()?;
        self.by_permalink
            .get(&permalink)
            .map(|&idx| &self.documents[idx])
    }

    /// Zero-based position of a document in the sequence.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Report documents that share an id with an earlier one.
///
/// Runs over all validated documents, drafts included.
fn duplicate_ids(sorted: &[Document]) -> Vec<ValidationError> {
    let mut seen: HashMap<&str, &Document> = HashMap::with_capacity(sorted.len());
    let mut errors = Vec::new();
    for doc in sorted {
        match seen.entry(doc.id.as_str()) {
            Entry::Vacant(entry) => {
                entry.insert(doc);
            }
            Entry::Occupied(entry) => errors.push(ValidationError::new(
                doc.id.as_str(),
                ErrorKind::DuplicateId {
                    first_path: entry.get().source_path.clone(),
                    second_path: doc.source_path.clone(),
                },
            )),
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(id: &str, order: u32, permalink: &str) -> Document {
        Document {
            id: id.to_owned(),
            title: format!("Tip {id}"),
            order,
            permalink: permalink.to_owned(),
            published: true,
            layout: None,
            page_type: None,
            sidenav: None,
            extra: BTreeMap::new(),
            body: String::new(),
            source_path: PathBuf::from(format!("{id}.md")),
        }
    }

    fn draft(id: &str, order: u32, permalink: &str) -> Document {
        Document {
            published: false,
            ..doc(id, order, permalink)
        }
    }

    fn ids(index: &Index) -> Vec<&str> {
        index.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_build_sorts_by_order() {
        let index = Index::build(
            vec![
                doc("134", 134, "/tips/134"),
                doc("024", 24, "/tips/24"),
                doc("061", 61, "/tips/61"),
            ],
            &IndexOptions::default(),
        )
        .unwrap();

        assert_eq!(ids(&index), vec!["024", "061", "134"]);
    }

    #[test]
    fn test_build_independent_of_arrival_order() {
        let docs = vec![
            doc("b", 2, "/b"),
            doc("a", 2, "/a"),
            doc("c", 1, "/c"),
            doc("d", 3, "/d"),
        ];
        let mut reversed = docs.clone();
        reversed.reverse();

        let forward = Index::build(docs, &IndexOptions::default()).unwrap();
        let backward = Index::build(reversed, &IndexOptions::default()).unwrap();

        assert_eq!(forward.documents(), backward.documents());
        assert_eq!(ids(&forward), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_equal_order_ties_broken_by_id() {
        let index = Index::build(
            vec![doc("tip-b", 5, "/b"), doc("tip-a", 5, "/a")],
            &IndexOptions::default(),
        )
        .unwrap();

        assert_eq!(ids(&index), vec!["tip-a", "tip-b"]);
    }

    #[test]
    fn test_drafts_excluded() {
        let index = Index::build(
            vec![doc("024", 24, "/tips/24"), draft("061", 61, "/tips/61")],
            &IndexOptions::default(),
        )
        .unwrap();

        assert_eq!(ids(&index), vec!["024"]);
        assert_eq!(index.excluded_drafts(), 1);
        assert!(index.get("061").is_none());
        assert!(index.by_permalink("/tips/61").is_none());
    }

    #[test]
    fn test_drafts_included_on_request() {
        let index = Index::build(
            vec![doc("024", 24, "/tips/24"), draft("061", 61, "/tips/61")],
            &IndexOptions {
                include_drafts: true,
            },
        )
        .unwrap();

        assert_eq!(ids(&index), vec!["024", "061"]);
        assert_eq!(index.excluded_drafts(), 0);
    }

    #[test]
    fn test_duplicate_permalink_names_both_ids() {
        // Later order, earlier arrival: the error still names them in sequence order.
        let errors = Index::build(
            vec![doc("999", 999, "/tips/61"), doc("061", 61, "/tips/61")],
            &IndexOptions::default(),
        )
        .unwrap_err();

        assert_eq!(
            errors,
            vec![ValidationError::new(
                "999",
                ErrorKind::DuplicatePermalink {
                    permalink: "/tips/61".to_owned(),
                    first_id: "061".to_owned(),
                    second_id: "999".to_owned(),
                },
            )]
        );
    }

    #[test]
    fn test_duplicate_permalink_with_equal_order() {
        let errors = Index::build(
            vec![doc("a", 1, "/same"), doc("b", 1, "/same")],
            &IndexOptions::default(),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind.name(), "DuplicatePermalinkError");
    }

    #[test]
    fn test_every_duplicate_reported() {
        let errors = Index::build(
            vec![
                doc("a", 1, "/x"),
                doc("b", 2, "/x"),
                doc("c", 3, "/x"),
                doc("d", 4, "/y"),
                doc("e", 5, "/y"),
            ],
            &IndexOptions::default(),
        )
        .unwrap_err();

        let reported: Vec<_> = errors.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(reported, vec!["b", "c", "e"]);
    }

    #[test]
    fn test_draft_does_not_conflict_with_published() {
        let index = Index::build(
            vec![doc("061", 61, "/tips/61"), draft("061-old", 60, "/tips/61")],
            &IndexOptions::default(),
        )
        .unwrap();

        assert_eq!(ids(&index), vec!["061"]);
    }

    #[test]
    fn test_duplicate_id_reported() {
        let mut second = doc("024", 24, "/tips/24-alt");
        second.source_path = PathBuf::from("024.markdown");

        let errors =
            Index::build(vec![doc("024", 24, "/tips/24"), second], &IndexOptions::default())
                .unwrap_err();

        assert_eq!(
            errors,
            vec![ValidationError::new(
                "024",
                ErrorKind::DuplicateId {
                    first_path: PathBuf::from("024.markdown"),
                    second_path: PathBuf::from("024.md"),
                },
            )]
        );
    }

    #[test]
    fn test_lookups() {
        let index = Index::build(
            vec![doc("024", 24, "/tips/24"), doc("061", 61, "/tips/61")],
            &IndexOptions::default(),
        )
        .unwrap();

        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
        assert_eq!(index.get("061").map(|d| d.order), Some(61));
        assert_eq!(index.by_permalink("tips/24/").map(|d| d.id.as_str()), Some("024"));
        assert_eq!(index.position("061"), Some(1));
        assert_eq!(index.position("missing"), None);
    }

    #[test]
    fn test_empty_index() {
        let index = Index::build(Vec::new(), &IndexOptions::default()).unwrap();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
