//! Error types for notesync-content

/// Result type for notesync-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notesync-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid encoding: {message}")]
    InvalidEncoding { message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
