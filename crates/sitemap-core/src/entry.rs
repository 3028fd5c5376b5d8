//! A single validated sitemap entry.
//!
//! [`UrlEntry`] owns the four recognized fields (`loc`, `lastmod`,
//! `changefreq`, `priority`) plus any opaque extension fields. Every value
//! passes its validator before it is stored, so an entry never holds a
//! partially invalid state.
//!
//! ## Strict and lenient entries
//!
//! A strict entry (the default) returns [`Error::Validation`] from the
//! mutator that introduced a bad value. A lenient entry keeps its previous
//! value, records the issue in [`UrlEntry::warnings`] and logs it through
//! `tracing`, then carries on. Documents parsed from XML are always built
//! from lenient entries.
//!
//! ```rust
//! use sitemap_core::{Fields, UrlEntry};
//!
//! let fields = Fields::from([("loc", "https://example.com/"), ("priority", "7")]);
//!
//! // Strict construction rejects the bad priority outright.
//! assert!(UrlEntry::from_fields(&fields).is_err());
//!
//! // Lenient construction keeps the good fields and reports the bad one.
//! let entry = UrlEntry::from_fields_lenient(&fields);
//! assert_eq!(entry.loc(), Some("https://example.com/"));
//! assert_eq!(entry.priority(), None);
//! assert_eq!(entry.warnings().len(), 1);
//! ```

use tracing::warn;

use crate::error::{Error, Result, ValidationError};
use crate::fields::{Field, Fields};
use crate::validate::{
    ChangeFrequency, Priority, validate_extension_name, validate_lastmod, validate_loc,
};

/// How an entry reacts to a rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Fail the mutation with [`Error::Validation`].
    #[default]
    Strict,
    /// Keep the previous value and record a warning.
    Lenient,
}

/// One `<url>` item of a sitemap.
#[derive(Debug, Clone, Default)]
pub struct UrlEntry {
    loc: Option<String>,
    lastmod: Option<String>,
    changefreq: Option<ChangeFrequency>,
    priority: Option<Priority>,
    extensions: Fields,
    mode: ValidationMode,
    warnings: Vec<ValidationError>,
}

/// Entries compare by their stored fields only; mode and warnings are
/// bookkeeping.
impl PartialEq for UrlEntry {
    fn eq(&self, other: &Self) -> bool {
        self.loc == other.loc
            && self.lastmod == other.lastmod
            && self.changefreq == other.changefreq
            && self.priority == other.priority
            && self.extensions == other.extensions
    }
}

impl UrlEntry {
    /// Create an empty strict entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty entry with the given validation mode.
    #[must_use]
    pub fn with_mode(mode: ValidationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Shorthand for a strict entry holding only `loc`.
    pub fn from_loc(loc: impl Into<String>) -> Result<Self> {
        let mut entry = Self::new();
        entry.set_loc(loc)?;
        Ok(entry)
    }

    /// Build a strict entry, routing every key through [`UrlEntry::set`].
    ///
    /// The first rejected value aborts construction.
    pub fn from_fields(fields: &Fields) -> Result<Self> {
        let mut entry = Self::new();
        entry.apply(fields)?;
        Ok(entry)
    }

    /// Build a lenient entry. Rejected values end up in
    /// [`UrlEntry::warnings`] instead of failing construction.
    #[must_use]
    pub fn from_fields_lenient(fields: &Fields) -> Self {
        let mut entry = Self::with_mode(ValidationMode::Lenient);
        for (key, value) in fields.iter() {
            // Lenient `set` reports through warnings and never returns Err.
            let _ = entry.set(key, value);
        }
        entry
    }

    /// Apply every pair of `fields` in order.
    pub fn apply(&mut self, fields: &Fields) -> Result<()> {
        for (key, value) in fields.iter() {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Assign a field by name.
    ///
    /// An empty value clears the field. Recognized names go through their
    /// validator. Any other name is an extension field: strict entries reject
    /// it as unrecognized, lenient entries keep it as an opaque value (if the
    /// name is a usable element name).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.parse::<Field>() {
            Ok(field) if value.is_empty() => {
                self.unset(field);
                Ok(())
            },
            Ok(Field::Loc) => self.set_loc(value).map(drop),
            Ok(Field::Lastmod) => self.set_lastmod(value).map(drop),
            Ok(Field::Changefreq) => self.set_changefreq_text(value).map(drop),
            Ok(Field::Priority) => self.set_priority_text(value).map(drop),
            Err(()) => match self.mode {
                ValidationMode::Strict => Err(Error::Validation(ValidationError::new(
                    key,
                    value,
                    "unrecognized field",
                ))),
                ValidationMode::Lenient => self.set_extension(key, value),
            },
        }
    }

    /// Clear one recognized field.
    pub fn unset(&mut self, field: Field) {
        match field {
            Field::Loc => self.loc = None,
            Field::Lastmod => self.lastmod = None,
            Field::Changefreq => self.changefreq = None,
            Field::Priority => self.priority = None,
        }
    }

    /// The page URL, if set.
    #[must_use]
    pub fn loc(&self) -> Option<&str> {
        self.loc.as_deref()
    }

    /// Validate and store `loc`. Returns the value now stored.
    pub fn set_loc(&mut self, value: impl Into<String>) -> Result<Option<&str>> {
        let value = value.into();
        if value.is_empty() {
            self.loc = None;
        } else {
            match validate_loc(&value) {
                Ok(()) => self.loc = Some(value),
                Err(issue) => self.reject(issue)?,
            }
        }
        Ok(self.loc())
    }

    /// The last modification date as written, if set.
    #[must_use]
    pub fn lastmod(&self) -> Option<&str> {
        self.lastmod.as_deref()
    }

    /// Validate and store `lastmod`. Returns the value now stored.
    pub fn set_lastmod(&mut self, value: impl Into<String>) -> Result<Option<&str>> {
        let value = value.into();
        if value.is_empty() {
            self.lastmod = None;
        } else {
            match validate_lastmod(&value) {
                Ok(()) => self.lastmod = Some(value),
                Err(issue) => self.reject(issue)?,
            }
        }
        Ok(self.lastmod())
    }

    /// The change frequency, if set.
    #[must_use]
    pub const fn changefreq(&self) -> Option<ChangeFrequency> {
        self.changefreq
    }

    /// Store an already-typed change frequency.
    pub const fn set_changefreq(&mut self, value: ChangeFrequency) {
        self.changefreq = Some(value);
    }

    /// Parse and store a change frequency token. Returns the value now stored.
    pub fn set_changefreq_text(&mut self, value: &str) -> Result<Option<ChangeFrequency>> {
        if value.is_empty() {
            self.changefreq = None;
        } else {
            match value.parse() {
                Ok(freq) => self.changefreq = Some(freq),
                Err(issue) => self.reject(issue)?,
            }
        }
        Ok(self.changefreq)
    }

    /// The crawl priority, if set.
    #[must_use]
    pub fn priority(&self) -> Option<f64> {
        self.priority.map(Priority::value)
    }

    /// Validate and store a numeric priority. Returns the value now stored.
    pub fn set_priority(&mut self, value: f64) -> Result<Option<f64>> {
        match Priority::new(value) {
            Ok(priority) => self.priority = Some(priority),
            Err(issue) => self.reject(issue)?,
        }
        Ok(self.priority())
    }

    /// Parse and store a textual priority. Returns the value now stored.
    pub fn set_priority_text(&mut self, value: &str) -> Result<Option<f64>> {
        if value.is_empty() {
            self.priority = None;
        } else {
            match value.parse() {
                Ok(priority) => self.priority = Some(priority),
                Err(issue) => self.reject(issue)?,
            }
        }
        Ok(self.priority())
    }

    /// Opaque extension fields, in insertion order.
    #[must_use]
    pub const fn extensions(&self) -> &Fields {
        &self.extensions
    }

    /// Look up one extension field.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&str> {
        self.extensions.get(name)
    }

    /// Store an opaque extension field, regardless of mode.
    ///
    /// The name must be a usable XML element name and must not shadow a
    /// recognized field.
    pub fn set_extension(&mut self, name: &str, value: &str) -> Result<()> {
        if name.parse::<Field>().is_ok() {
            return self.reject(ValidationError::new(
                name,
                value,
                "is a recognized field, not an extension",
            ));
        }
        match validate_extension_name(name) {
            Ok(()) => {
                self.extensions.insert(name, value);
                Ok(())
            },
            Err(issue) => self.reject(issue),
        }
    }

    /// Reset every stored field. The entry stays usable but no longer has a
    /// `loc`, so documents skip it.
    pub fn clear(&mut self) {
        self.loc = None;
        self.lastmod = None;
        self.changefreq = None;
        self.priority = None;
        self.extensions = Fields::new();
    }

    /// Whether the entry can be written to a sitemap (has a non-empty `loc`).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.loc.as_deref().is_some_and(|loc| !loc.is_empty())
    }

    /// The plain mapping written into one `<url>` element.
    ///
    /// Only present fields appear, in canonical order followed by extension
    /// fields. A priority of `0.0` is present and is included.
    #[must_use]
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        if let Some(loc) = &self.loc {
            fields.insert(Field::Loc.as_str(), loc.as_str());
        }
        if let Some(lastmod) = &self.lastmod {
            fields.insert(Field::Lastmod.as_str(), lastmod.as_str());
        }
        if let Some(freq) = self.changefreq {
            fields.insert(Field::Changefreq.as_str(), freq.as_str());
        }
        if let Some(priority) = self.priority {
            fields.insert(Field::Priority.as_str(), priority.to_string());
        }
        for (name, value) in self.extensions.iter() {
            if !value.is_empty() {
                fields.insert(name, value);
            }
        }
        fields
    }

    /// Current validation mode.
    #[must_use]
    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Whether rejected values are downgraded to warnings.
    #[must_use]
    pub fn is_lenient(&self) -> bool {
        self.mode == ValidationMode::Lenient
    }

    /// Switch the validation mode for subsequent mutations.
    pub const fn set_mode(&mut self, mode: ValidationMode) {
        self.mode = mode;
    }

    /// Issues recorded while in lenient mode.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Drain the recorded issues.
    pub fn take_warnings(&mut self) -> Vec<ValidationError> {
        std::mem::take(&mut self.warnings)
    }

    fn reject(&mut self, issue: ValidationError) -> Result<()> {
        match self.mode {
            ValidationMode::Strict => Err(Error::Validation(issue)),
            ValidationMode::Lenient => {
                warn!(
                    field = %issue.field,
                    value = %issue.value,
                    reason = %issue.reason,
                    "Ignoring invalid sitemap field"
                );
                self.warnings.push(issue);
                Ok(())
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_entry() -> UrlEntry {
        UrlEntry::from_fields(&Fields::from([
            ("loc", "http://example.com/"),
            ("lastmod", "2005-06-03"),
            ("changefreq", "daily"),
            ("priority", "1.0"),
        ]))
        .unwrap()
    }

    #[test]
    fn test_accessors_return_stored_values() {
        let entry = full_entry();
        assert_eq!(entry.loc(), Some("http://example.com/"));
        assert_eq!(entry.lastmod(), Some("2005-06-03"));
        assert_eq!(entry.changefreq(), Some(ChangeFrequency::Daily));
        assert_eq!(entry.priority(), Some(1.0));
        assert!(entry.is_valid());
    }

    #[test]
    fn test_strict_rejection_keeps_previous_value() {
        // Given: A strict entry with a valid priority
        let mut entry = full_entry();

        // When: Assigning an out-of-range priority
        let result = entry.set_priority(1.5);

        // Then: The call fails and the old value stays
        let Err(Error::Validation(issue)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(issue.field, "priority");
        assert_eq!(issue.value, "1.5");
        assert_eq!(entry.priority(), Some(1.0));
        assert!(entry.warnings().is_empty());
    }

    #[test]
    fn test_lenient_rejection_records_warning() {
        // Given: A lenient entry with a loc
        let mut entry = UrlEntry::with_mode(ValidationMode::Lenient);
        entry.set_loc("https://example.com/").unwrap();

        // When: Assigning garbage to every other field and to loc
        entry.set_loc("not a url").unwrap();
        entry.set_lastmod("June 3rd").unwrap();
        entry.set_changefreq_text("sometimes").unwrap();
        entry.set_priority_text("high").unwrap();

        // Then: Nothing changed and four warnings were recorded
        assert_eq!(entry.loc(), Some("https://example.com/"));
        assert_eq!(entry.lastmod(), None);
        assert_eq!(entry.changefreq(), None);
        assert_eq!(entry.priority(), None);
        let fields: Vec<_> = entry.warnings().iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["loc", "lastmod", "changefreq", "priority"]);
    }

    #[test]
    fn test_empty_value_clears_field() {
        let mut entry = full_entry();
        entry.set("lastmod", "").unwrap();
        entry.set_changefreq_text("").unwrap();
        assert_eq!(entry.lastmod(), None);
        assert_eq!(entry.changefreq(), None);
        assert_eq!(entry.loc(), Some("http://example.com/"));
    }

    #[test]
    fn test_clear_soft_deletes() {
        let mut entry = full_entry();
        entry.set_extension("image:loc", "http://example.com/a.png").unwrap();

        entry.clear();
        entry.clear();

        assert!(!entry.is_valid());
        assert!(entry.to_fields().is_empty());
    }

    #[test]
    fn test_to_fields_order_and_zero_priority() {
        // Given: Fields supplied out of canonical order, priority zero
        let entry = UrlEntry::from_fields(&Fields::from([
            ("priority", "0.0"),
            ("changefreq", "never"),
            ("loc", "https://example.com/old"),
        ]))
        .unwrap();

        // When: Converting back to a mapping
        let fields = entry.to_fields();

        // Then: Canonical order, lastmod omitted, zero priority kept
        let keys: Vec<_> = fields.keys().collect();
        assert_eq!(keys, vec!["loc", "changefreq", "priority"]);
        assert_eq!(fields.get("priority"), Some("0.0"));
    }

    #[test]
    fn test_unknown_key_strict_vs_lenient() {
        let fields = Fields::from([("loc", "https://example.com/"), ("image", "a.png")]);

        let Err(Error::Validation(issue)) = UrlEntry::from_fields(&fields) else {
            panic!("strict construction should reject unknown keys");
        };
        assert_eq!(issue.field, "image");
        assert_eq!(issue.reason, "unrecognized field");

        let entry = UrlEntry::from_fields_lenient(&fields);
        assert_eq!(entry.extension("image"), Some("a.png"));
        assert!(entry.warnings().is_empty());
        assert_eq!(entry.to_fields().keys().last(), Some("image"));
    }

    #[test]
    fn test_lenient_unusable_extension_name_warns() {
        let entry = UrlEntry::from_fields_lenient(&Fields::from([
            ("loc", "https://example.com/"),
            ("bad name", "x"),
        ]));
        assert!(entry.extensions().is_empty());
        assert_eq!(entry.warnings().len(), 1);
    }

    #[test]
    fn test_extension_cannot_shadow_known_field() {
        let mut entry = UrlEntry::new();
        assert!(entry.set_extension("priority", "0.3").is_err());
        assert!(entry.extensions().is_empty());
    }

    #[test]
    fn test_equality_ignores_mode_and_warnings() {
        let strict = full_entry();
        let mut lenient = UrlEntry::from_fields_lenient(&strict.to_fields());
        lenient.set_priority_text("9").unwrap();
        assert_eq!(strict, lenient);
        assert_eq!(lenient.take_warnings().len(), 1);
        assert!(lenient.warnings().is_empty());
    }

    proptest! {
        #[test]
        fn test_valid_loc_is_retrievable_unchanged(path in "[A-Za-z0-9/._~-]{0,300}") {
            let url = format!("https://example.com/{path}");
            let entry = UrlEntry::from_loc(url.clone()).unwrap();
            prop_assert_eq!(entry.loc(), Some(url.as_str()));
        }

        #[test]
        fn test_lenient_out_of_range_priority_keeps_prior(prior in 0.0f64..=1.0, bad in 1.01f64..100.0) {
            let mut entry = UrlEntry::with_mode(ValidationMode::Lenient);
            entry.set_priority(prior).unwrap();
            entry.set_priority(bad).unwrap();
            entry.set_priority(-bad).unwrap();
            prop_assert_eq!(entry.priority(), Some(prior));
            prop_assert_eq!(entry.warnings().len(), 2);
        }

        #[test]
        fn test_clear_always_invalidates(priority in 0.0f64..=1.0, freq in 0usize..7) {
            let mut entry = UrlEntry::from_loc("http://example.com/").unwrap();
            entry.set_priority(priority).unwrap();
            entry.set_changefreq(ChangeFrequency::ALL[freq]);
            entry.clear();
            prop_assert!(!entry.is_valid());
            prop_assert!(entry.to_fields().is_empty());
        }
    }
}
