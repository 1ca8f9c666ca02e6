//! Shared test utilities for the notesync workspace.
//!
//! Dev-dependency only, never published. Use it from `tests/` directories;
//! unit tests inside a crate it depends on would see a second copy of that
//! crate.
//!
//! # Modules
//!
//! - [`service`]: [`MemoryNoteService`], a note service that records calls
//! - [`files`]: [`MemoryFileStore`], a file store with controllable mtimes
//! - [`dir`]: [`TestDir`] builder for real directories

pub mod dir;
pub mod files;
pub mod service;

pub use dir::TestDir;
pub use files::MemoryFileStore;
pub use service::{Call, MemoryNoteService, StoredNote};
