//! Configuration file and settings resolution
//!
//! Settings come from, in decreasing priority: command-line flags (and the
//! `NOTESYNC_*` environment variables clap maps onto them), the config file,
//! then built-in defaults.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use notesync_content::Format;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "notesync";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "notesync.log";

/// `[remote]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSection {
    /// Directory of the note store
    pub store: Option<PathBuf>,
    /// Access token of the note store
    pub token: Option<String>,
}

/// `[sync]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSection {
    pub mask: Option<String>,
    pub format: Option<Format>,
    pub log_path: Option<PathBuf>,
}

/// Parsed config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub remote: RemoteSection,
    #[serde(default)]
    pub sync: SyncSection,
}

impl FileConfig {
    /// Parse config file content read from `source`.
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            CliError::config(format!("Invalid config file {}: {}", source.display(), e))
        })
    }

    /// Load the config file.
    ///
    /// An explicit path must exist. The default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(CliError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content, &path)
    }
}

/// `<config_dir>/notesync/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// `~/notesync.log`, or `notesync.log` in the working directory without a home.
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(LOG_FILE))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE))
}

/// Effective settings of one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    store: Option<PathBuf>,
    token: Option<String>,
    pub mask: Option<String>,
    pub format: Format,
    pub log_path: PathBuf,
    /// Whether the log path was chosen explicitly rather than defaulted
    pub custom_log_path: bool,
}

impl Settings {
    /// Merge command-line values over the config file.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let custom_log_path = cli.logpath.is_some() || file.sync.log_path.is_some();
        Self {
            store: cli.store.clone().or(file.remote.store),
            token: cli.token.clone().or(file.remote.token),
            mask: cli.sync.mask.clone().or(file.sync.mask),
            format: cli
                .sync
                .format
                .map(Format::from)
                .or(file.sync.format)
                .unwrap_or_default(),
            log_path: cli
                .logpath
                .clone()
                .or(file.sync.log_path)
                .unwrap_or_else(default_log_path),
            custom_log_path,
        }
    }

    /// Directory of the note store.
    pub fn store(&self) -> Result<&Path> {
        self.store.as_deref().ok_or_else(|| {
            CliError::config("No note store configured. Use --store, NOTESYNC_STORE or [remote] store")
        })
    }

    /// Access token, if any. Its absence is reported by the store.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
