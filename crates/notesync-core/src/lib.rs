//! Reconciliation engine for notesync
//!
//! Keeps a local directory of text files and a remote notebook eventually
//! consistent:
//!
//! - **Matching**: files and notes are paired by exact name
//! - **Classification**: each pair is compared against the last-synced
//!   snapshot to find which side changed
//! - **SyncEngine**: one pass uploads, downloads and records what it touched
//!
//! # Architecture
//!
//! ```text
//!                    notesync-cli
//!                         |
//!        +----------------+----------------+
//!        |                                 |
//!   notesync-core                   notesync-store
//!        |                                 |
//!   +----+-------------+                   |
//!   |                  |                   |
//! notesync-fs   notesync-content      notesync-fs
//! ```
//!
//! The engine talks to the remote side only through [`NoteService`] and to
//! the local side only through [`FileStore`](notesync_fs::FileStore).
//!
//! # Example
//!
//! ```ignore
//! use notesync_core::{Policy, SyncEngine, SyncOptions};
//! use notesync_fs::LocalDir;
//!
//! let files = LocalDir::open("/home/me/Notes", None)?;
//! let engine = SyncEngine::new(&service, files, None, SyncOptions::default())?;
//! let report = engine.run_pass(Policy::TwoWay)?;
//! ```

pub mod error;
pub mod remote;
pub mod snapshot;
pub mod sync;

pub use error::{Error, ErrorKind, Result};
pub use remote::{Container, NoteId, NoteService, RemoteItem};
pub use snapshot::{SnapshotStore, SyncRecord, SyncState};
pub use sync::{
    Action, Binding, ChangeState, Freshness, MatchedPair, Matching, PassReport, Policy, SyncEngine,
    SyncOptions, classify, match_items,
};

/// A file in the synchronized directory. Its name is the file name without
/// extension.
pub type LocalItem = notesync_fs::FileEntry;
