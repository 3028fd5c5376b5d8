//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error, I/O failure |
//! | 2 | `Usage` | Invalid arguments, unsupported input, missing file argument |
//! | 3 | `NotFound` | Sitemap file does not exist |
//! | 4 | `InvalidData` | Rejected field values, malformed XML, warnings from `check` |
//!
//! ```bash
//! sitemap check public/sitemap.xml
//! case $? in
//!     0) echo "clean" ;;
//!     4) echo "sitemap has problems" ;;
//!     *) echo "other error" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

use sitemap_core::Error as CoreError;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,
    /// Invalid arguments or input shape (exit code 2).
    Usage = 2,
    /// Requested file not found (exit code 3).
    NotFound = 3,
    /// Sitemap data is invalid (exit code 4).
    InvalidData = 4,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::InvalidData => "invalid sitemap data",
        }
    }

    /// Category for an error coming out of sitemap-core.
    #[must_use]
    pub fn for_core_error(err: &CoreError) -> Self {
        match err {
            CoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => Self::NotFound,
            CoreError::Validation(_) | CoreError::Parse(_) => Self::InvalidData,
            CoreError::UnsupportedInput(_) | CoreError::MissingDestination | CoreError::Config(_) => {
                Self::Usage
            },
            CoreError::Io(_) | CoreError::Serialization(_) => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create an invalid-data error.
    pub fn invalid_data(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::InvalidData, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

// Display already shows the wrapped error; the chain continues below it.
impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let inner: &(dyn std::error::Error + 'static) = self.source.as_ref();
        inner.source()
    }
}

/// Work out the exit code for an error returned from a command.
///
/// Explicit [`CliError`]s win; otherwise the first sitemap-core error in the
/// chain decides; anything else is internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    err.chain()
        .find_map(|cause| cause.downcast_ref::<CoreError>())
        .map_or(ErrorCategory::Internal, ErrorCategory::for_core_error)
        .exit_code()
}
