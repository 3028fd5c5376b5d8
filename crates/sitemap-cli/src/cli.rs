//! # CLI Structure and Argument Parsing
//!
//! The `sitemap` binary edits sitemap files in place. Every subcommand takes
//! the file to work on as its first argument.
//!
//! ```bash
//! sitemap new public/sitemap.xml --xmlns http://www.sitemaps.org/schemas/sitemap/0.9
//! sitemap add public/sitemap.xml https://example.com/ https://example.com/about
//! sitemap add public/sitemap.xml loc https://example.com/blog changefreq daily priority 0.8
//! sitemap show public/sitemap.xml --format json
//! sitemap check public/sitemap.xml.gz
//! ```
//!
//! Global options (`--verbose`, `--quiet`, `--no-color`, `--config`) apply to
//! every subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::output::OutputFormat;

/// Main CLI structure for the `sitemap` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "sitemap")]
#[command(version)]
#[command(about = "sitemap - Build, validate and edit XML sitemaps", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to a configuration file
    #[arg(long, global = true, value_name = "FILE", env = "SITEMAP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Create an empty sitemap file
    New {
        /// Sitemap file to create (`.gz` for gzip)
        file: PathBuf,

        /// Namespace for the `urlset` root (defaults to the configured one)
        #[arg(long, value_name = "URI")]
        xmlns: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Add entries from URLs or `key value` pairs
    ///
    /// Either every argument is a URL (one entry each), or the arguments are
    /// alternating field names and values describing a single entry.
    Add {
        /// Sitemap file to update
        file: PathBuf,

        /// URLs, or alternating field names and values
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        args: Vec<String>,

        /// Start a new sitemap if the file does not exist
        #[arg(long)]
        create: bool,
    },

    /// List the entries in a sitemap
    Show {
        /// Sitemap file to read
        file: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Report values that would be dropped when the sitemap is rewritten
    Check {
        /// Sitemap file to check
        file: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove every entry with the given location
    #[command(alias = "rm")]
    Remove {
        /// Sitemap file to update
        file: PathBuf,

        /// Locations to remove
        #[arg(required = true, num_args = 1..)]
        locs: Vec<String>,
    },

    /// Print the sitemap as it would be written
    Cat {
        /// Sitemap file to read
        file: PathBuf,

        /// Write attributes on one line instead of indented elements
        #[arg(long)]
        compact: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Output format requested by the command, if it has one.
    #[must_use]
    pub const fn format(&self) -> Option<OutputFormat> {
        match self {
            Self::Show { format, .. } | Self::Check { format, .. } => Some(*format),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_keeps_argument_order() {
        let cli = Cli::try_parse_from([
            "sitemap",
            "add",
            "out.xml",
            "loc",
            "http://example.com/",
            "priority",
            "0.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Add { args, create, .. } => {
                assert_eq!(args, ["loc", "http://example.com/", "priority", "0.5"]);
                assert!(!create);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_add_requires_arguments() {
        assert!(Cli::try_parse_from(["sitemap", "add", "out.xml"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sitemap", "show", "out.xml", "--format", "json", "-v"])
            .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.command.format(), Some(OutputFormat::Json));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sitemap", "-q", "-v", "cat", "out.xml"]).is_err());
    }
}
