//! Sync policy and engine options

use crate::Error;
use notesync_content::Format;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a sync pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// Push local changes and create notes for new files
    #[default]
    Up,
    /// Pull remote changes and create files for new notes
    Down,
    /// Upload first, then download
    TwoWay,
}

impl Policy {
    pub fn upload_enabled(&self) -> bool {
        matches!(self, Self::Up | Self::TwoWay)
    }

    pub fn download_enabled(&self) -> bool {
        matches!(self, Self::Down | Self::TwoWay)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::TwoWay => "two-way",
        }
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "upload" => Ok(Self::Up),
            "down" | "download" => Ok(Self::Down),
            "two-way" | "twoway" | "both" => Ok(Self::TwoWay),
            _ => Err(Error::config(format!("Invalid sync policy: {}", s))),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options fixed for the lifetime of an engine
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Format of the local files
    pub format: Format,
    /// The user resolved conflicts locally; local content wins over a
    /// concurrently changed note
    pub merge_authorized: bool,
    /// Classify and report without touching either side or the snapshot.
    /// Actions are prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_merge_authorized(mut self, merge_authorized: bool) -> Self {
        self.merge_authorized = merge_authorized;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
