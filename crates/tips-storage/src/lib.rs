//! Document loading for the tips index builder.
//!
//! This crate provides a [`Source`] trait for abstracting where tip documents
//! come from, and the raw record type every source produces. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between metadata validation and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Source`] trait with a single `documents()` method
//! - [`FsSource`] implementation that walks a content directory
//! - [`MockSource`] for testing (behind `mock` feature flag)
//!
//! Every source splits each document into its front matter (the text between
//! the `---` delimiters) and its body. The front matter is not interpreted
//! here; that is the validator's job.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use tips_storage::{FsSource, Source};
//!
//! let source = FsSource::new(PathBuf::from("content"));
//! for doc in source.documents()? {
//!     let doc = doc?;
//!     println!("{}: {} bytes of body", doc.id, doc.body.len());
//! }
//! ```

mod front_matter;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod scanner;
mod source;

pub use front_matter::MalformedReason;
pub use fs::FsSource;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{Documents, LoadError, RawDocument, Source, StorageError, StorageErrorKind};
