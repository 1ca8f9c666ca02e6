//! Snapshot of the last synchronized state
//!
//! One [`SyncState`] belongs to one directory/notebook binding and is stored
//! as a hidden TOML file inside the directory. It is loaded at the start of a
//! pass and replaced in full, atomically, at the end.

mod record;

pub use record::SyncRecord;

use crate::{Error, Result};
use notesync_fs::{NormalizedPath, ReservedName, io};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const FORMAT_VERSION: &str = "1";

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

/// Mapping from item name to its last-synced record
///
/// Entries are kept sorted so that saving an unchanged state produces the
/// same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    entries: BTreeMap<String, SyncRecord>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncState {
    /// Create an empty state
    pub fn new() -> Self {
        Self {
            version: default_version(),
            entries: BTreeMap::new(),
        }
    }

    /// Get the record for a name
    pub fn get(&self, name: &str) -> Option<&SyncRecord> {
        self.entries.get(name)
    }

    /// Insert or replace the record for a name
    pub fn insert(&mut self, name: impl Into<String>, record: SyncRecord) {
        self.entries.insert(name.into(), record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Location of the snapshot of one binding
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: NormalizedPath,
}

impl SnapshotStore {
    /// Snapshot for `notebook` stored in `directory`.
    pub fn for_binding(directory: &NormalizedPath, notebook: &str) -> Self {
        let file_name = ReservedName::snapshot(notebook).file_name();
        Self {
            path: directory.join(&file_name),
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Load the snapshot, or an empty state if none has been written yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Snapshot`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<SyncState> {
        if !self.path.exists() {
            return Ok(SyncState::new());
        }

        let content = io::read_text(&self.path).map_err(|e| self.error(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(SyncState::new());
        }

        toml::from_str(&content).map_err(|e| self.error(e.to_string()))
    }

    /// Replace the snapshot with `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Snapshot`] if the state cannot be serialized or
    /// written.
    pub fn save(&self, state: &SyncState) -> Result<()> {
        let content = toml::to_string_pretty(state).map_err(|e| self.error(e.to_string()))?;
        io::write_atomic(&self.path, content.as_bytes()).map_err(|e| self.error(e.to_string()))
    }

    fn error(&self, message: String) -> Error {
        Error::Snapshot {
            path: self.path.to_native(),
            message,
        }
    }
}
