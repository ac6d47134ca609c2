//! Side navigation and previous/next links.
//!
//! Derived entirely from an [`Index`]: one [`NavDescriptor`] per document in
//! sequence order, plus the flat side-nav listing.

use serde::Serialize;

use crate::document::Document;
use crate::index::Index;

/// Link to a neighbouring document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Target document id.
    pub id: String,
    /// Target permalink.
    pub permalink: String,
    /// Target title, for link text.
    pub title: String,
}

impl NavLink {
    fn to(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            permalink: doc.permalink.clone(),
            title: doc.title.clone(),
        }
    }
}

/// Navigation data for one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavDescriptor {
    /// Document id.
    pub id: String,
    /// Document permalink.
    pub permalink: String,
    /// Zero-based position in the sequence.
    pub position: usize,
    /// Number of documents in the sequence.
    pub total: usize,
    /// Previous document (absent for the first).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavLink>,
    /// Next document (absent for the last).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

/// Entry of the side navigation listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidenavItem {
    /// Document id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Link target.
    pub permalink: String,
    /// Sort key.
    pub order: u32,
}

/// Navigation for the whole index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Flat listing in sequence order.
    pub sidenav: Vec<SidenavItem>,
    /// One descriptor per document, in sequence order.
    pub pages: Vec<NavDescriptor>,
}

impl Navigation {
    /// Derive navigation from an index.
    ///
    /// An empty index yields empty navigation.
    #[must_use]
    pub fn from_index(index: &Index) -> Self {
        let docs = index.documents();
        let total = docs.len();

        let sidenav = docs
            .iter()
            .map(|doc| SidenavItem {
                id: doc.id.clone(),
                title: doc.title.clone(),
                permalink: doc.permalink.clone(),
                order: doc.order,
            })
            .collect();

        let pages = docs
            .iter()
            .enumerate()
            .map(|(position, doc)| NavDescriptor {
                id: doc.id.clone(),
                permalink: doc.permalink.clone(),
                position,
                total,
                previous: position
                    .checked_sub(1)
                    .and_then(|prev| docs.get(prev))
                    .map(NavLink::to),
                next: docs.get(position + 1).map(NavLink::to),
            })
            .collect();

        Self { sidenav, pages }
    }

    /// Descriptor for a document id.
    #[must_use]
    pub fn descriptor(&self, id: &str) -> Option<&NavDescriptor> {
        self.pages.iter().find(|page| page.id == id)
    }

    /// Whether there is nothing to navigate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
