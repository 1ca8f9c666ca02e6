//! Error types for notesync-fs

use std::path::PathBuf;

/// Result type for notesync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notesync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Invalid glob mask '{mask}': {message}")]
    InvalidMask { mask: String, message: String },

    #[error("File {path} is not valid UTF-8 text")]
    NotUtf8 { path: PathBuf },

    #[error("Invalid item name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
