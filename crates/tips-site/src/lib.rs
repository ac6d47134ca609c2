//! Metadata validation, indexing and navigation for tip documents.
//!
//! This crate provides:
//! - [`validate`]: coerce a document's loosely typed front matter into a [`Document`]
//! - [`Index`]: deterministic ordered index of published documents
//! - [`Navigation`]: side-nav listing and previous/next links
//! - [`Site`]: the full pipeline and its JSON artifact
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use tips_site::{BuildOptions, Site};
//! use tips_storage::FsSource;
//!
//! let source = FsSource::new(PathBuf::from("content"));
//! let site = Site::build(&source, &BuildOptions::default())?;
//!
//! print!("{}", site.to_json()?);
//! # Ok(())
//! # }
//! ```

mod document;
mod error;
mod index;
pub mod metadata;
mod navigation;
mod site;

pub use document::Document;
pub use error::{ErrorKind, ValidationError};
pub use index::{Index, IndexOptions};
pub use metadata::validate;
pub use navigation::{NavDescriptor, NavLink, Navigation, SidenavItem};
pub use site::{Artifact, BuildError, BuildFailure, BuildOptions, Site};
