//! Print a sitemap file as it would be written.

use std::path::Path;

use anyhow::Result;
use sitemap_core::Config;

/// Re-encode `file` to stdout, optionally in compact form.
pub fn execute(file: &Path, compact: bool, config: &Config) -> Result<()> {
    let (mut doc, _) = super::open(file, config)?;
    if compact {
        doc.set_pretty(false);
    }

    let xml = doc.to_xml()?;
    if compact {
        println!("{xml}");
    } else {
        print!("{xml}");
    }
    Ok(())
}
