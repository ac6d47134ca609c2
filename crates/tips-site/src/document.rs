//! Validated tip document.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// A tip whose metadata passed validation.
///
/// Fields that only the external renderer cares about (`layout`, `type`,
/// `sidenav`, and any unknown keys) are carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    /// Stable identifier derived from the source location.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Sort key, normalized from strings like `"024"`.
    pub order: u32,
    /// Normalized URL path (leading `/`, no trailing `/`).
    pub permalink: String,
    /// Whether the document is part of the published index.
    pub published: bool,
    /// Template the renderer should use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// Content type tag for the renderer.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    /// Side navigation the renderer should attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidenav: Option<String>,
    /// Any other metadata keys, unchanged.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
    /// Body text, opaque.
    pub body: String,
    /// File the document was loaded from.
    #[serde(skip)]
    pub source_path: PathBuf,
}

impl Document {
    /// Sort key of the document within the index.
    pub(crate) fn sort_key(&self) -> (u32, &str) {
        (self.order, &self.id)
    }
}
