//! Remove entries from a sitemap file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use sitemap_core::Config;

/// Clear every entry whose `loc` is in `locs`, then rewrite the file.
///
/// The file is left alone when nothing matched.
pub fn execute(file: &Path, locs: &[String], config: &Config, quiet: bool) -> Result<()> {
    let (mut doc, _) = super::open(file, config)?;

    let removed: usize = locs.iter().map(|loc| doc.clear_loc(loc)).sum();
    if removed == 0 {
        if !quiet {
            println!("No entries matched");
        }
        return Ok(());
    }

    doc.prune();
    doc.write(Some(file))
        .with_context(|| format!("Failed to write {}", file.display()))?;

    if !quiet {
        println!(
            "{} Removed {} {} from {}",
            "✓".green(),
            removed,
            if removed == 1 { "entry" } else { "entries" },
            file.display().to_string().bold()
        );
    }
    Ok(())
}
