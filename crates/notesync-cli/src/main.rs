//! notesync CLI
//!
//! Synchronizes a directory of text files with a notebook of a note store.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use config::{FileConfig, Settings};
use error::Result;

fn main() {
    if let Err(e) = run() {
        tracing::error!(error = %e, "notesync failed");
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let file_config = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file_config);

    logging::init(&settings.log_path, cli.verbose, settings.custom_log_path)?;

    match &cli.command {
        Some(Commands::InitStore) => commands::run_init_store(&settings),
        Some(Commands::Notebooks { json }) => commands::run_notebooks(&settings, *json),
        None => commands::run_sync(&settings, &cli.sync),
    }
}
