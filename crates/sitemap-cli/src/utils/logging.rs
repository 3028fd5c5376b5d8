//! Logging initialization and color control.

use anyhow::Result;
use colored::control as color_control;
use is_terminal::IsTerminal;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;
use crate::output::OutputFormat;

/// Pick the log level for the given flags.
///
/// Warnings show by default so lenient reads are visible; JSON output drops to
/// errors only unless `--verbose` asked for more.
#[must_use]
pub fn log_level(cli: &Cli) -> Level {
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet || cli.command.format() == Some(OutputFormat::Json) {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Install the global tracing subscriber and apply color settings.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let machine_output = cli.command.format() == Some(OutputFormat::Json);
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output || !std::io::stdout().is_terminal() {
        color_control::set_override(false);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(log_level(&parse(&["sitemap", "cat", "a.xml"])), Level::WARN);
    }

    #[test]
    fn test_verbose_wins_over_json() {
        let cli = parse(&["sitemap", "-v", "show", "a.xml", "--format", "json"]);
        assert_eq!(log_level(&cli), Level::DEBUG);
    }

    #[test]
    fn test_json_and_quiet_only_report_errors() {
        let json = parse(&["sitemap", "check", "a.xml", "--format", "json"]);
        let quiet = parse(&["sitemap", "--quiet", "cat", "a.xml"]);

        assert_eq!(log_level(&json), Level::ERROR);
        assert_eq!(log_level(&quiet), Level::ERROR);
    }
}
