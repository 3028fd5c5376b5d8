//! Report problems in a sitemap file.

use std::path::Path;

use anyhow::{Result, anyhow};
use sitemap_core::Config;

use crate::error::CliError;
use crate::output::{CheckReport, OutputFormat, format_report, print_json};

/// Read `file` and report every value a rewrite would lose.
///
/// Fails with the invalid-data exit code when anything was found.
pub fn execute(file: &Path, format: OutputFormat, config: &Config) -> Result<()> {
    let (doc, warnings) = super::open(file, config)?;
    let entries = doc.entries().len();
    let report = CheckReport {
        entries,
        hidden: doc.all_entries().len() - entries,
        warnings,
    };

    match format {
        OutputFormat::Text => println!("{}", format_report(&report)),
        OutputFormat::Json => print_json(&report)?,
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::invalid_data(anyhow!(
            "{} has {} problem(s)",
            file.display(),
            report.warnings.len() + report.hidden
        ))
        .into())
    }
}
