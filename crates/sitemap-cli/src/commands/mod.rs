//! Command implementations for the sitemap CLI.
//!
//! Each command lives in its own module with an `execute` entry point.

mod add;
mod cat;
mod check;
mod completions;
mod new;
mod remove;
mod show;

pub use add::execute as add;
pub use cat::execute as cat;
pub use check::execute as check;
pub use completions::generate as completions;
pub use new::execute as new;
pub use remove::execute as remove;
pub use show::execute as show;

use std::path::Path;

use anyhow::{Context, Result};
use sitemap_core::{Config, SitemapDocument, ValidationError};

/// Read an existing sitemap, starting from the configured defaults.
///
/// The file's own namespace replaces the configured one when it declares
/// one. Rejected values come back as warnings.
pub fn open(
    file: &Path,
    config: &Config,
) -> Result<(SitemapDocument, Vec<ValidationError>)> {
    let mut doc = SitemapDocument::from_config(config);
    let warnings = doc
        .read(Some(file))
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok((doc, warnings))
}
