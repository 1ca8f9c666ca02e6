//! Directory-backed note service
//!
//! A store is a directory shared between clients:
//!
//! ```text
//! store/
//! ├── store.toml        format version and access token
//! ├── notebooks.json    every notebook
//! └── notes/
//!     └── <id>.json     one note: title, notebook, timestamps, markup
//! ```
//!
//! [`FileNoteService`] implements [`NoteService`](notesync_core::NoteService)
//! on top of it. Every file is replaced atomically.

pub mod error;
pub mod manifest;
pub mod model;
pub mod service;

pub use error::{Error, Result};
pub use manifest::StoreManifest;
pub use model::{NoteHeader, NoteRecord, NotebookRecord};
pub use service::FileNoteService;
