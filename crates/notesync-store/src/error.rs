//! Error types for notesync-store

use std::path::PathBuf;

/// Result type for notesync-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notesync-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No access token was presented
    #[error("No access token given. Set one in the config file or with --token")]
    MissingCredential,

    /// The presented token does not match the store
    #[error("Access token rejected by the store at {path}")]
    Unauthorized { path: PathBuf },

    /// The directory holds no store
    #[error("No note store at {path}. Create one with 'notesync init-store'")]
    NotAStore { path: PathBuf },

    /// `init` on a directory that already holds a store
    #[error("A note store already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// Unsupported store format version
    #[error("Unsupported store version '{version}' at {path}")]
    UnsupportedVersion { path: PathBuf, version: String },

    /// A notebook with this name already exists
    #[error("Notebook '{name}' already exists")]
    DuplicateNotebook { name: String },

    /// A notebook or note is missing
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// A store file cannot be parsed or serialized
    #[error("Invalid store file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Filesystem error from notesync-fs
    #[error(transparent)]
    Fs(#[from] notesync_fs::Error),
}

impl From<Error> for notesync_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingCredential
            | Error::Unauthorized { .. }
            | Error::NotAStore { .. }
            | Error::AlreadyExists { .. }
            | Error::UnsupportedVersion { .. } => notesync_core::Error::config(err.to_string()),
            other => notesync_core::Error::remote(other.to_string()),
        }
    }
}
