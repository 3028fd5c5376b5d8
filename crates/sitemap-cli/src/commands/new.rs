//! Create an empty sitemap file.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use sitemap_core::{Config, SitemapDocument};

use crate::error::CliError;

/// Write an empty `urlset` to `file`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn execute(
    file: &Path,
    xmlns: Option<&str>,
    force: bool,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    if file.exists() && !force {
        return Err(CliError::usage(anyhow!(
            "{} already exists (use --force to overwrite)",
            file.display()
        ))
        .into());
    }

    let mut doc = SitemapDocument::from_config(config);
    if let Some(namespace) = xmlns {
        doc.set_namespace(namespace).map_err(CliError::usage)?;
    }
    doc.write(Some(file))
        .with_context(|| format!("Failed to write {}", file.display()))?;

    if !quiet {
        println!(
            "{} Created {}",
            "✓".green(),
            file.display().to_string().bold()
        );
    }
    Ok(())
}
