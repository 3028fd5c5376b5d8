//! Add entries to a sitemap file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use sitemap_core::{Config, SitemapDocument};
use tracing::debug;

/// Add the entries described by `args` and rewrite the file.
///
/// Nothing is written when any argument is rejected.
pub fn execute(
    file: &Path,
    args: &[String],
    create: bool,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    let mut doc = if create && !file.exists() {
        debug!(path = %file.display(), "Starting a new sitemap");
        SitemapDocument::from_config(config)
    } else {
        super::open(file, config)?.0
    };

    let added = doc.add_args(args).context("Nothing was added")?;
    doc.write(Some(file))
        .with_context(|| format!("Failed to write {}", file.display()))?;

    if !quiet {
        println!(
            "{} Added {} {} to {} ({} total)",
            "✓".green(),
            added,
            if added == 1 { "entry" } else { "entries" },
            file.display().to_string().bold(),
            doc.entries().len()
        );
    }
    Ok(())
}
