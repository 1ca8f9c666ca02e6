//! Log sink setup
//!
//! Events always go to a log file. `--verbose` adds a console layer. The level
//! defaults to `info` (`debug` when verbose) and `RUST_LOG` overrides it.

use crate::config::default_log_path;
use crate::error::{CliError, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the process-wide subscriber.
///
/// Must run once, before the first pass.
pub fn init(log_path: &Path, verbose: bool, custom_path: bool) -> Result<()> {
    if custom_path {
        remove_empty_default_log();
    }

    let file = open_log_file(log_path)?;
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    let console_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .without_time()
            .compact()
    });

    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| CliError::config(format!("Invalid log filter: {}", e)))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| CliError::config(format!("Cannot install logger: {}", e)))?;

    tracing::debug!(path = %log_path.display(), "Logging initialized");
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::config(format!("Cannot open log file {}: {}", path.display(), e)))
}

/// Remove an empty default log file left behind by an earlier run.
fn remove_empty_default_log() {
    let default = default_log_path();
    let is_empty = default.metadata().map(|m| m.is_file() && m.len() == 0).unwrap_or(false);
    if is_empty {
        let _ = std::fs::remove_file(&default);
    }
}
