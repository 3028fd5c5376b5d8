//! The sitemap document: an ordered collection of entries plus its envelope.
//!
//! [`SitemapDocument`] owns its entries exclusively. It accepts new entries
//! through [`SitemapDocument::add`], renders them with
//! [`SitemapDocument::to_xml`] and replaces them from XML text with
//! [`SitemapDocument::from_xml`].
//!
//! Entries without a `loc` (for example ones that were [`UrlEntry::clear`]ed)
//! stay in the backing list but are hidden from [`SitemapDocument::entries`]
//! and never serialized.
//!
//! ```rust
//! use sitemap_core::{AddInput, SitemapDocument};
//!
//! let mut doc = SitemapDocument::new();
//! doc.add(AddInput::Urls(vec!["http://a/".into(), "http://b/".into()]))?;
//!
//! let xml = doc.to_xml()?;
//! let mut copy = SitemapDocument::new();
//! let warnings = copy.from_xml(&xml)?;
//!
//! assert!(warnings.is_empty());
//! assert_eq!(copy.entries(), doc.entries());
//! # Ok::<(), sitemap_core::Error>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::codec::{self, EncodeOptions};
use crate::config::{Config, DEFAULT_NAMESPACE};
use crate::entry::UrlEntry;
use crate::error::{Error, Result, ValidationError};
use crate::ingest::AddInput;
use crate::storage;
use crate::validate::validate_extension_name;

/// An ordered, duplicate-tolerant list of [`UrlEntry`] values and the
/// `urlset` namespace they are published under.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapDocument {
    entries: Vec<UrlEntry>,
    namespace: String,
    prefixes: Vec<(String, String)>,
    pretty: bool,
    indent: usize,
    source_location: Option<PathBuf>,
}

impl Default for SitemapDocument {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            prefixes: Vec::new(),
            pretty: true,
            indent: 2,
            source_location: None,
        }
    }
}

impl SitemapDocument {
    /// An empty document with the default namespace and pretty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document using the configured defaults.
    ///
    /// A blank configured namespace falls back to the default one.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut doc = Self {
            pretty: config.defaults.pretty,
            indent: config.defaults.indent,
            ..Self::default()
        };
        if !config.defaults.namespace.trim().is_empty() {
            doc.namespace.clone_from(&config.defaults.namespace);
        }
        doc
    }

    /// The `xmlns` declared on the `urlset` root.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Override the namespace. It must not be blank: a document always
    /// declares one, so that reading it back restores it.
    pub fn set_namespace(&mut self, namespace: impl Into<String>) -> Result<()> {
        let namespace = namespace.into();
        if namespace.trim().is_empty() {
            return Err(ValidationError::new("xmlns", namespace, "must not be empty").into());
        }
        self.namespace = namespace;
        Ok(())
    }

    /// Prefixed namespace declarations (`xmlns:prefix="uri"`) written on the
    /// root, in order.
    #[must_use]
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Declare `prefix` for extension elements such as `image:caption`.
    ///
    /// Redeclaring a prefix replaces its URI.
    pub fn declare_prefix(&mut self, prefix: &str, uri: impl Into<String>) -> Result<()> {
        let uri = uri.into();
        let field = format!("xmlns:{prefix}");
        if prefix.contains(':')
            || prefix.starts_with("xml")
            || validate_extension_name(prefix).is_err()
        {
            return Err(
                ValidationError::new(field, prefix, "is not a usable namespace prefix").into(),
            );
        }
        if uri.trim().is_empty() {
            return Err(ValidationError::new(field, uri, "must not be empty").into());
        }

        match self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            Some((_, existing)) => *existing = uri,
            None => self.prefixes.push((prefix.to_string(), uri)),
        }
        Ok(())
    }

    /// Whether output is indented.
    #[must_use]
    pub const fn pretty(&self) -> bool {
        self.pretty
    }

    /// Switch between pretty and compact output. Parsed data is unaffected.
    pub const fn set_pretty(&mut self, pretty: bool) {
        self.pretty = pretty;
    }

    /// Spaces per nesting level in pretty output.
    pub const fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }

    /// Default file used by [`SitemapDocument::read`] and
    /// [`SitemapDocument::write`] when no path is given.
    #[must_use]
    pub fn source_location(&self) -> Option<&Path> {
        self.source_location.as_deref()
    }

    /// Set or clear the default file location.
    pub fn set_source_location(&mut self, location: Option<PathBuf>) {
        self.source_location = location;
    }

    /// Entries that can be written out: those with a non-empty `loc`, in
    /// insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<&UrlEntry> {
        self.entries.iter().filter(|e| e.is_valid()).collect()
    }

    /// Every stored entry, including ones hidden by [`SitemapDocument::entries`].
    #[must_use]
    pub fn all_entries(&self) -> &[UrlEntry] {
        &self.entries
    }

    /// Mutable access to every stored entry, e.g. to fix or clear them.
    pub fn all_entries_mut(&mut self) -> &mut [UrlEntry] {
        &mut self.entries
    }

    /// Replace the backing list verbatim. Invalid entries are stored but stay
    /// hidden until fixed.
    pub fn set_entries(&mut self, entries: Vec<UrlEntry>) {
        self.entries = entries;
    }

    /// Drop stored entries that have no `loc`. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(UrlEntry::is_valid);
        before - self.entries.len()
    }

    /// Clear every entry whose `loc` equals `loc`. Returns how many matched.
    pub fn clear_loc(&mut self, loc: &str) -> usize {
        let mut cleared = 0;
        for entry in self.entries.iter_mut().filter(|e| e.loc() == Some(loc)) {
            entry.clear();
            cleared += 1;
        }
        cleared
    }

    /// Append entries. Returns how many were appended.
    ///
    /// Mappings, field lists and URLs are turned into strict entries first;
    /// if any of them is rejected nothing is appended.
    #[instrument(skip_all)]
    pub fn add(&mut self, input: impl Into<AddInput>) -> Result<usize> {
        let entries = input.into().into_entries()?;
        let added = entries.len();
        self.entries.extend(entries);
        debug!(added, total = self.entries.len(), "Added sitemap entries");
        Ok(added)
    }

    /// Classify a raw argument list with [`AddInput::classify`] and add it.
    pub fn add_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<usize> {
        self.add(AddInput::classify(args)?)
    }

    /// Render the visible entries as a `urlset` document.
    ///
    /// No validation happens here; every stored value was checked when it
    /// was assigned.
    #[instrument(skip_all, fields(pretty = self.pretty))]
    pub fn to_xml(&self) -> Result<String> {
        let urls: Vec<_> = self.entries().into_iter().map(UrlEntry::to_fields).collect();
        codec::encode(
            &self.namespace,
            &self.prefixes,
            &urls,
            EncodeOptions {
                pretty: self.pretty,
                indent: self.indent,
            },
        )
    }

    /// Replace the entries and prefix declarations (and the namespace, if the
    /// document declares one) with the contents of `xml`.
    ///
    /// Entries are built leniently: rejected values are dropped and returned
    /// as warnings instead of failing the parse. Malformed XML fails with
    /// [`Error::Parse`] and leaves the document untouched.
    #[instrument(skip_all, fields(xml_len = xml.len()))]
    pub fn from_xml(&mut self, xml: &str) -> Result<Vec<ValidationError>> {
        let decoded = codec::decode(xml)?;

        let mut warnings = decoded.skipped;
        let entries: Vec<UrlEntry> = decoded
            .urls
            .iter()
            .map(|fields| {
                let mut entry = UrlEntry::from_fields_lenient(fields);
                warnings.extend(entry.take_warnings());
                entry
            })
            .collect();

        if let Some(namespace) = decoded.namespace.filter(|ns| !ns.trim().is_empty()) {
            self.namespace = namespace;
        }
        self.prefixes = decoded.prefixes;
        self.entries = entries;

        debug!(
            entries = self.entries.len(),
            warnings = warnings.len(),
            "Parsed sitemap"
        );
        Ok(warnings)
    }

    /// Read and parse a file, replacing the current entries.
    ///
    /// Uses `path` if given, else the source location. A successful read of
    /// an explicit path remembers it as the new source location.
    pub fn read(&mut self, path: Option<&Path>) -> Result<Vec<ValidationError>> {
        let target = self.destination(path)?;
        let text = storage::read_document(&target)?;
        let warnings = self.from_xml(&text)?;
        self.source_location = Some(target);
        Ok(warnings)
    }

    /// Serialize and write to `path`, or to the source location.
    pub fn write(&self, path: Option<&Path>) -> Result<()> {
        let target = self.destination(path)?;
        let xml = self.to_xml()?;
        storage::write_document(&target, &xml)
    }

    fn destination(&self, path: Option<&Path>) -> Result<PathBuf> {
        path.map(Path::to_path_buf)
            .or_else(|| self.source_location.clone())
            .ok_or(Error::MissingDestination)
    }
}
