//! Records persisted by the store

use notesync_core::{Container, NoteId, RemoteItem};
use serde::{Deserialize, Serialize};

/// One entry of `notebooks.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookRecord {
    pub id: String,
    pub name: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created: i64,
}

impl From<&NotebookRecord> for Container {
    fn from(record: &NotebookRecord) -> Self {
        Container {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }
}

/// Contents of `notes/<id>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
    /// Id of the owning notebook
    pub notebook: String,
    /// Milliseconds since the Unix epoch
    pub created: i64,
    /// Milliseconds since the Unix epoch; strictly increases on every write
    pub updated: i64,
    /// Note markup
    pub content: String,
}

impl From<&NoteRecord> for RemoteItem {
    fn from(record: &NoteRecord) -> Self {
        RemoteItem {
            id: NoteId::new(record.id.clone()),
            name: record.title.clone(),
            mod_time: record.updated,
        }
    }
}

/// `notes/<id>.json` without the markup, for listings
///
/// The `content` field is skipped while parsing, never copied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoteHeader {
    pub id: String,
    pub title: String,
    pub notebook: String,
    pub created: i64,
    pub updated: i64,
}

impl From<&NoteHeader> for RemoteItem {
    fn from(header: &NoteHeader) -> Self {
        RemoteItem {
            id: NoteId::new(header.id.clone()),
            name: header.title.clone(),
            mod_time: header.updated,
        }
    }
}
