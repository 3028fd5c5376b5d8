//! Error types and handling for sitemap-core operations.
//!
//! Every fallible function in this crate returns [`Result<T>`]. Errors are
//! grouped into a handful of categories so callers (and the CLI exit codes)
//! can tell bad data apart from programmer mistakes and I/O trouble:
//!
//! - **Validation**: a field value was rejected by its validator
//! - **Unsupported input**: `add` was handed a shape it cannot interpret
//! - **Missing destination**: read/write without a path or default location
//! - **Parse**: the XML text is malformed or is not a `urlset` document
//! - **I/O, Serialization, Configuration**: ambient failures
//!
//! ```rust
//! use sitemap_core::{Error, UrlEntry};
//!
//! let mut entry = UrlEntry::new();
//! match entry.set_priority_text("2.0") {
//!     Err(Error::Validation(issue)) => {
//!         assert_eq!(issue.field, "priority");
//!         assert_eq!(issue.value, "2.0");
//!     },
//!     other => panic!("expected a validation error, got {other:?}"),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// A field value rejected by its validator.
///
/// Carries the field name, the rejected value (as text) and a human-readable
/// reason. In lenient mode the same value is reported as a warning instead of
/// being returned as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("invalid {field} '{value}': {reason}")]
pub struct ValidationError {
    /// Name of the field that rejected the value.
    pub field: String,
    /// The rejected value, rendered as text.
    pub value: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// The main error type for sitemap-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed while reading or writing a sitemap file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field mutator rejected a value in strict mode.
    ///
    /// The value was not stored; the entry keeps its previous state.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// `add` received input it cannot interpret.
    ///
    /// Always fatal: this signals a caller mistake rather than bad data.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// A read or write was requested without a path and the document has no
    /// default location configured.
    #[error("No destination given and no default sitemap location configured")]
    MissingDestination,

    /// The XML text is malformed or does not describe a `urlset`.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Producing XML or JSON output failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(format!("Failed to serialize config: {err}"))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse config: {err}"))
    }
}

impl Error {
    /// Check if the error might go away when the operation is retried.
    ///
    /// Only interrupted or timed-out I/O qualifies; bad data and caller
    /// mistakes never fix themselves.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a stable string identifier.
    ///
    /// - `"io"` - File system operations
    /// - `"validation"` - Rejected field values
    /// - `"unsupported_input"` - Uninterpretable `add` input
    /// - `"missing_destination"` - No path and no default location
    /// - `"parse"` - Malformed or foreign XML
    /// - `"serialization"` - Output encoding
    /// - `"config"` - Configuration files
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Validation(_) => "validation",
            Self::UnsupportedInput(_) => "unsupported_input",
            Self::MissingDestination => "missing_destination",
            Self::Parse(_) => "parse",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
