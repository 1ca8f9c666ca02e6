//! `store.toml`: store format version and access token

use crate::{Error, Result};
use notesync_fs::{NormalizedPath, io};
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "store.toml";
pub const STORE_VERSION: &str = "1";

/// Contents of `store.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreManifest {
    pub version: String,
    pub token: String,
}

impl StoreManifest {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            token: token.into(),
        }
    }

    /// Read the manifest of the store at `root`.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(Error::NotAStore {
                path: root.to_native(),
            });
        }

        let content = io::read_text(&path)?;
        let manifest: Self = toml::from_str(&content).map_err(|e| Error::Parse {
            path: path.to_native(),
            message: e.to_string(),
        })?;

        if manifest.version != STORE_VERSION {
            return Err(Error::UnsupportedVersion {
                path: path.to_native(),
                version: manifest.version,
            });
        }
        Ok(manifest)
    }

    pub fn save(&self, root: &NormalizedPath) -> Result<()> {
        let path = root.join(MANIFEST_FILE);
        let content = toml::to_string_pretty(self).map_err(|e| Error::Parse {
            path: path.to_native(),
            message: e.to_string(),
        })?;
        io::write_text(&path, &content)?;
        Ok(())
    }
}
