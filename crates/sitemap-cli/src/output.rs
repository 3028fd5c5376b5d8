//! Output formatting for entries and diagnostics.
//!
//! Text goes to humans (colored when stdout allows it), JSON goes to scripts
//! and is always a single pretty-printed value on stdout.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;
use sitemap_core::{Fields, SitemapDocument, ValidationError};

/// Output format for commands that list data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// A single JSON document
    Json,
}

/// JSON shape of `show`.
#[derive(Debug, Serialize)]
pub struct DocumentView<'a> {
    /// Namespace declared on the root.
    pub namespace: &'a str,
    /// Visible entries, fields in canonical order.
    pub entries: Vec<Fields>,
}

impl<'a> DocumentView<'a> {
    /// Snapshot the visible entries of a document.
    #[must_use]
    pub fn new(doc: &'a SitemapDocument) -> Self {
        Self {
            namespace: doc.namespace(),
            entries: doc.entries().into_iter().map(|e| e.to_fields()).collect(),
        }
    }
}

/// JSON shape of `check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Entries that will be written.
    pub entries: usize,
    /// Stored entries without a `loc`, dropped on write.
    pub hidden: usize,
    /// Values rejected while reading.
    pub warnings: Vec<ValidationError>,
}

impl CheckReport {
    /// Whether the file would be rewritten unchanged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.hidden == 0 && self.warnings.is_empty()
    }
}

/// Render entries as text, one block per entry.
#[must_use]
pub fn format_entries(view: &DocumentView<'_>) -> String {
    let mut out = String::new();
    for fields in &view.entries {
        let mut rest = fields.iter().filter(|(key, _)| *key != "loc").peekable();
        let loc = fields.get("loc").unwrap_or_default();
        let _ = writeln!(out, "{}", loc.green().bold());
        while let Some((key, value)) = rest.next() {
            let branch = if rest.peek().is_some() { "├─" } else { "└─" };
            let _ = writeln!(out, "  {} {}: {value}", branch.dimmed(), key.cyan());
        }
    }
    let _ = write!(
        out,
        "{} {} in {}",
        view.entries.len(),
        if view.entries.len() == 1 { "entry" } else { "entries" },
        view.namespace.dimmed()
    );
    out
}

/// Render a check report as text.
#[must_use]
pub fn format_report(report: &CheckReport) -> String {
    let mut out = String::new();
    for warning in &report.warnings {
        let _ = writeln!(out, "{} {warning}", "warning:".yellow().bold());
    }
    if report.hidden > 0 {
        let _ = writeln!(
            out,
            "{} {} without loc will be dropped",
            "warning:".yellow().bold(),
            report.hidden
        );
    }
    if report.is_clean() {
        let _ = write!(out, "{} {} entries ok", "✓".green(), report.entries);
    } else {
        let _ = write!(
            out,
            "{} {} entries, {} problems",
            "✗".red(),
            report.entries,
            report.warnings.len() + report.hidden
        );
    }
    out
}

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> SitemapDocument {
        let mut doc = SitemapDocument::new();
        doc.add_args(&["loc", "http://example.com/", "priority", "0.5"])
            .unwrap();
        doc
    }

    #[test]
    fn test_text_lists_fields_under_loc() {
        colored::control::set_override(false);
        let doc = sample();

        let text = format_entries(&DocumentView::new(&doc));

        assert!(text.starts_with("http://example.com/\n"));
        assert!(text.contains("└─ priority: 0.5"));
        assert!(text.ends_with(&format!("1 entry in {}", doc.namespace())));
    }

    #[test]
    fn test_json_view_shape() {
        let doc = sample();

        let json = serde_json::to_value(DocumentView::new(&doc)).unwrap();

        assert_eq!(json["entries"][0]["loc"], "http://example.com/");
        assert_eq!(json["entries"][0]["priority"], "0.5");
        assert_eq!(json["namespace"], doc.namespace());
    }

    #[test]
    fn test_report_cleanliness() {
        let mut report = CheckReport {
            entries: 2,
            hidden: 0,
            warnings: Vec::new(),
        };
        assert!(report.is_clean());

        report
            .warnings
            .push(ValidationError::new("priority", "7", "out of range"));
        assert!(!report.is_clean());
    }
}
