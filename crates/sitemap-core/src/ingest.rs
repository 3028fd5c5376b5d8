//! Input shapes accepted by [`SitemapDocument::add`].
//!
//! Callers with typed data pick a variant directly. Callers holding a raw
//! argument list (a command line, a config file) use [`AddInput::classify`],
//! which applies the dispatch rules:
//!
//! 1. first argument looks like a field name (`^\w+$`): the whole list is a
//!    flat `key value key value ...` mapping for one entry;
//! 2. first argument looks like a URL (`^\w+://`): every argument is a bare
//!    URL and becomes its own entry;
//! 3. anything else is [`Error::UnsupportedInput`].
//!
//! ```rust
//! use sitemap_core::AddInput;
//!
//! let args = ["http://a/".to_string(), "http://b/".to_string()];
//! assert!(matches!(AddInput::classify(&args)?, AddInput::Urls(urls) if urls.len() == 2));
//!
//! let args = ["loc", "http://a/", "priority", "0.5"].map(String::from);
//! assert!(matches!(AddInput::classify(&args)?, AddInput::FieldList(_)));
//! # Ok::<(), sitemap_core::Error>(())
//! ```
//!
//! [`SitemapDocument::add`]: crate::SitemapDocument::add

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::UrlEntry;
use crate::error::{Error, Result};
use crate::fields::Fields;

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static FIELD_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static URL_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+://").unwrap());

/// The closed set of things that can be added to a document.
#[derive(Debug, Clone, PartialEq)]
pub enum AddInput {
    /// Ready-made entries, appended as they are.
    Entries(Vec<UrlEntry>),
    /// One strict entry per mapping.
    Mappings(Vec<Fields>),
    /// A flat `key value ...` list describing exactly one entry.
    FieldList(Vec<String>),
    /// Bare URLs; one entry per URL with only `loc` populated.
    Urls(Vec<String>),
}

impl AddInput {
    /// Classify a raw argument list.
    pub fn classify<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let Some(first) = args.first().map(AsRef::as_ref) else {
            return Err(Error::UnsupportedInput(
                "empty argument list; expected URLs or field/value pairs".to_string(),
            ));
        };

        if FIELD_NAME_RE.is_match(first) {
            return Ok(Self::FieldList(
                args.iter().map(|a| a.as_ref().to_string()).collect(),
            ));
        }

        if URL_LIKE_RE.is_match(first) {
            if let Some(stray) = args
                .iter()
                .map(AsRef::as_ref)
                .find(|a| !URL_LIKE_RE.is_match(a))
            {
                return Err(Error::UnsupportedInput(format!(
                    "'{stray}' in a URL list does not look like a URL"
                )));
            }
            return Ok(Self::Urls(
                args.iter().map(|a| a.as_ref().to_string()).collect(),
            ));
        }

        Err(Error::UnsupportedInput(format!(
            "'{first}' is neither a field name nor a URL"
        )))
    }

    /// Turn the input into strict entries without touching any document.
    ///
    /// The first rejected value aborts the whole conversion, so callers can
    /// append all-or-nothing.
    pub fn into_entries(self) -> Result<Vec<UrlEntry>> {
        match self {
            Self::Entries(entries) => Ok(entries),
            Self::Mappings(mappings) => mappings.iter().map(UrlEntry::from_fields).collect(),
            Self::FieldList(list) => {
                let fields = pair_up(list)?;
                Ok(vec![UrlEntry::from_fields(&fields)?])
            },
            Self::Urls(urls) => urls.into_iter().map(UrlEntry::from_loc).collect(),
        }
    }
}

impl From<UrlEntry> for AddInput {
    fn from(entry: UrlEntry) -> Self {
        Self::Entries(vec![entry])
    }
}

impl From<Vec<UrlEntry>> for AddInput {
    fn from(entries: Vec<UrlEntry>) -> Self {
        Self::Entries(entries)
    }
}

impl From<Fields> for AddInput {
    fn from(fields: Fields) -> Self {
        Self::Mappings(vec![fields])
    }
}

impl From<Vec<Fields>> for AddInput {
    fn from(mappings: Vec<Fields>) -> Self {
        Self::Mappings(mappings)
    }
}

fn pair_up(list: Vec<String>) -> Result<Fields> {
    if list.len() % 2 != 0 {
        return Err(Error::UnsupportedInput(format!(
            "field list has {} items; expected key/value pairs",
            list.len()
        )));
    }
    let mut fields = Fields::new();
    let mut items = list.into_iter();
    while let (Some(key), Some(value)) = (items.next(), items.next()) {
        fields.insert(key, value);
    }
    Ok(fields)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_classify_urls() {
        let input = AddInput::classify(&strings(&["http://a/", "http://b/"])).unwrap();
        assert_eq!(input, AddInput::Urls(strings(&["http://a/", "http://b/"])));
    }

    #[test]
    fn test_classify_field_list() {
        let input = AddInput::classify(&strings(&["loc", "http://a/", "changefreq", "daily"]))
            .unwrap();
        let AddInput::FieldList(list) = input else {
            panic!("expected a field list");
        };
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_classify_rejects_other_shapes() {
        for args in [
            strings(&[]),
            strings(&["/relative/path"]),
            strings(&["two words"]),
            strings(&["http://a/", "not-a-url"]),
        ] {
            let Err(Error::UnsupportedInput(_)) = AddInput::classify(&args) else {
                panic!("expected unsupported input for {args:?}");
            };
        }
    }

    #[test]
    fn test_url_like_but_invalid_scheme_fails_validation_not_classification() {
        // Given: A URL-shaped argument with an unsupported scheme
        let input = AddInput::classify(&strings(&["ftp://a/"])).unwrap();

        // When: Building entries
        let result = input.into_entries();

        // Then: The loc validator rejects it
        assert!(matches!(result, Err(Error::Validation(issue)) if issue.field == "loc"));
    }

    #[test]
    fn test_odd_field_list_is_unsupported() {
        let input = AddInput::FieldList(strings(&["loc", "http://a/", "priority"]));
        assert!(matches!(input.into_entries(), Err(Error::UnsupportedInput(_))));
    }

    #[test]
    fn test_field_list_builds_one_entry() {
        let entries = AddInput::FieldList(strings(&["loc", "http://a/", "priority", "0.3"]))
            .into_entries()
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].loc(), Some("http://a/"));
        assert_eq!(entries[0].priority(), Some(0.3));
    }

    #[test]
    fn test_mappings_are_all_or_nothing() {
        let input = AddInput::Mappings(vec![
            Fields::from([("loc", "http://a/")]),
            Fields::from([("loc", "http://b/"), ("priority", "2.0")]),
        ]);
        assert!(input.into_entries().is_err());
    }
}
