//! Filesystem access for notesync
//!
//! Provides path handling, file discovery by glob mask, atomic writes and the
//! reserved names used for the files notesync keeps next to the user's notes.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use constants::ReservedName;
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_item_name};
pub use store::{FileEntry, FileStore, LocalDir};
