//! List the entries of a sitemap file.

use std::path::Path;

use anyhow::Result;
use sitemap_core::Config;

use crate::output::{DocumentView, OutputFormat, format_entries, print_json};

/// Print the entries that would be written back.
pub fn execute(file: &Path, format: OutputFormat, config: &Config) -> Result<()> {
    let (doc, _) = super::open(file, config)?;
    let view = DocumentView::new(&doc);

    match format {
        OutputFormat::Text => println!("{}", format_entries(&view)),
        OutputFormat::Json => print_json(&view)?,
    }
    Ok(())
}
