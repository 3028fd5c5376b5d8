//! # sitemap-core
//!
//! Build, validate, read and write XML sitemaps: documents listing the URLs
//! of a site together with optional crawl hints (last modification date,
//! change frequency, priority).
//!
//! ## Architecture
//!
//! - **Entries**: [`UrlEntry`] holds one `<url>` item. Every value is checked
//!   by its validator before it is stored.
//! - **Documents**: [`SitemapDocument`] owns an ordered list of entries, the
//!   `urlset` namespace and the XML encode/decode round trip.
//! - **Ingestion**: [`AddInput`] is the closed set of shapes `add` accepts.
//! - **Glue**: [`storage`] moves text to and from disk (gzip for `.gz`),
//!   [`Config`] supplies defaults for new documents.
//!
//! ## Quick Start
//!
//! ```rust
//! use sitemap_core::{Fields, SitemapDocument};
//!
//! let mut doc = SitemapDocument::new();
//! doc.add(Fields::from([
//!     ("loc", "http://example.com/"),
//!     ("lastmod", "2005-06-03"),
//!     ("changefreq", "daily"),
//!     ("priority", "1.0"),
//! ]))?;
//!
//! let xml = doc.to_xml()?;
//! assert!(xml.contains("<priority>1.0</priority>"));
//! # Ok::<(), sitemap_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use sitemap_core::{Error, SitemapDocument};
//!
//! let mut doc = SitemapDocument::new();
//! match doc.add_args(&["loc", "http://example.com/", "priority", "2"]) {
//!     Ok(_) => unreachable!(),
//!     Err(Error::Validation(issue)) => eprintln!("rejected: {issue}"),
//!     Err(e) => eprintln!("other failure ({}): {e}", e.category()),
//! }
//! assert!(doc.entries().is_empty());
//! ```
//!
//! ## Concurrency
//!
//! Nothing here locks. Documents and entries are plain owned values; share
//! them across threads only behind the caller's own synchronization.

/// XML encoding and decoding of `urlset` documents
pub mod codec;
/// Defaults for new documents, loaded from TOML
pub mod config;
/// The document: entries plus envelope
pub mod document;
/// A single validated entry
pub mod entry;
/// Error types and result aliases
pub mod error;
/// Field names and ordered field mappings
pub mod fields;
/// Accepted input shapes for `add`
pub mod ingest;
/// File reading and writing, with gzip by suffix
pub mod storage;
/// Per-field validators and typed field values
pub mod validate;

pub use codec::EncodeOptions;
pub use config::{Config, DEFAULT_NAMESPACE, DefaultsConfig};
pub use document::SitemapDocument;
pub use entry::{UrlEntry, ValidationMode};
pub use error::{Error, Result, ValidationError};
pub use fields::{Field, Fields};
pub use ingest::AddInput;
pub use validate::{ChangeFrequency, Priority};
