//! Error types for notesync-core

use std::path::PathBuf;

/// Result type for notesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// How an error affects a sync pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad path, notebook or credentials; nothing was attempted
    Config,
    /// A single item's content cannot be converted; the item is skipped
    Encoding,
    /// The note service or a local write rejected a single item
    Remote,
    /// The persisted sync state cannot be read or written
    Snapshot,
}

/// Errors that can occur in notesync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid engine configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Content of an item cannot be encoded for the other side
    #[error("Encoding error for '{name}': {message}")]
    Encoding { name: String, message: String },

    /// A note service call failed
    #[error("Remote operation failed: {message}")]
    Remote { message: String },

    /// The note service reported that an update was not applied
    #[error("Note '{name}' was not updated")]
    NotUpdated { name: String },

    /// The snapshot file cannot be read, parsed or written
    #[error("Snapshot error at {path}: {message}")]
    Snapshot { path: PathBuf, message: String },

    /// Filesystem error from notesync-fs
    #[error(transparent)]
    Fs(#[from] notesync_fs::Error),

    /// Conversion error from notesync-content
    #[error(transparent)]
    Content(#[from] notesync_content::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Classify the error for the pass-level error policy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Config,
            Self::Encoding { .. } | Self::Content(_) => ErrorKind::Encoding,
            Self::Remote { .. } | Self::NotUpdated { .. } => ErrorKind::Remote,
            Self::Snapshot { .. } => ErrorKind::Snapshot,
            Self::Fs(err) => match err {
                notesync_fs::Error::NotUtf8 { .. } | notesync_fs::Error::InvalidName { .. } => {
                    ErrorKind::Encoding
                }
                notesync_fs::Error::DirectoryNotFound { .. }
                | notesync_fs::Error::InvalidMask { .. } => ErrorKind::Config,
                _ => ErrorKind::Remote,
            },
        }
    }

    /// Whether the error must abort the whole pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Config | ErrorKind::Snapshot)
    }
}
