//! sitemap CLI - build, validate and edit XML sitemaps
//!
//! The binary in `main.rs` is a thin wrapper around [`run`]; exit codes are
//! derived from the returned error by [`error::exit_code_from_error`].

use anyhow::{Context, Result};
use clap::Parser;
use sitemap_core::Config;

mod cli;
mod commands;
pub mod error;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::initialize_logging;

/// Parse the command line and run the selected command.
///
/// # Errors
///
/// Returns an error if logging, configuration loading or the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let config = load_config(&cli)?;
    execute(cli, &config)
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

fn execute(cli: Cli, config: &Config) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::New { file, xmlns, force } => {
            commands::new(&file, xmlns.as_deref(), force, config, quiet)
        },
        Commands::Add { file, args, create } => commands::add(&file, &args, create, config, quiet),
        Commands::Show { file, format } => commands::show(&file, format, config),
        Commands::Check { file, format } => commands::check(&file, format, config),
        Commands::Remove { file, locs } => commands::remove(&file, &locs, config, quiet),
        Commands::Cat { file, compact } => commands::cat(&file, compact, config),
        Commands::Completions { shell } => {
            commands::completions(shell);
            Ok(())
        },
    }
}
