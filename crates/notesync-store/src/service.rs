//! [`FileNoteService`]: the note service over a store directory

use crate::manifest::StoreManifest;
use crate::model::{NoteHeader, NoteRecord, NotebookRecord};
use crate::{Error, Result};
use notesync_core::{Container, NoteId, NoteService, RemoteItem};
use notesync_fs::{NormalizedPath, io};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use uuid::Uuid;

const NOTEBOOKS_FILE: &str = "notebooks.json";
const NOTES_DIR: &str = "notes";

/// Note service backed by a store directory
#[derive(Debug, Clone)]
pub struct FileNoteService {
    root: NormalizedPath,
}

impl FileNoteService {
    /// Create an empty store at `root` protected by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if `root` already holds a store and
    /// [`Error::MissingCredential`] if the token is empty.
    pub fn init(root: impl AsRef<Path>, token: &str) -> Result<Self> {
        let root = NormalizedPath::new(root);
        if token.trim().is_empty() {
            return Err(Error::MissingCredential);
        }
        if root.join(crate::manifest::MANIFEST_FILE).exists() {
            return Err(Error::AlreadyExists {
                path: root.to_native(),
            });
        }

        StoreManifest::new(token).save(&root)?;
        let service = Self { root };
        service.save_notebooks(&[])?;
        std::fs::create_dir_all(service.notes_dir().to_native())
            .map_err(|e| notesync_fs::Error::io(service.notes_dir().to_native(), e))?;

        tracing::info!(root = %service.root, "Initialized note store");
        Ok(service)
    }

    /// Open the store at `root`, presenting `token`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] without a token,
    /// [`Error::NotAStore`] if `root` holds no store and
    /// [`Error::Unauthorized`] if the token does not match.
    pub fn open(root: impl AsRef<Path>, token: Option<&str>) -> Result<Self> {
        let root = NormalizedPath::new(root);
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingCredential)?;

        let manifest = StoreManifest::load(&root)?;
        if manifest.token != token {
            return Err(Error::Unauthorized {
                path: root.to_native(),
            });
        }

        tracing::debug!(root = %root, "Opened note store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn notebooks_path(&self) -> NormalizedPath {
        self.root.join(NOTEBOOKS_FILE)
    }

    fn notes_dir(&self) -> NormalizedPath {
        self.root.join(NOTES_DIR)
    }

    fn note_path(&self, id: &str) -> NormalizedPath {
        self.notes_dir().join(&format!("{}.json", id))
    }

    pub fn notebooks(&self) -> Result<Vec<NotebookRecord>> {
        let path = self.notebooks_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    fn save_notebooks(&self, notebooks: &[NotebookRecord]) -> Result<()> {
        write_json(&self.notebooks_path(), notebooks)
    }

    /// Every note of the store, oldest first.
    pub fn notes(&self) -> Result<Vec<NoteRecord>> {
        let mut notes: Vec<NoteRecord> = self.read_note_files()?;
        notes.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(notes)
    }

    /// Headers of every note of the store, oldest first. Markup is not loaded.
    pub fn note_headers(&self) -> Result<Vec<NoteHeader>> {
        let mut headers: Vec<NoteHeader> = self.read_note_files()?;
        headers.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(headers)
    }

    fn read_note_files<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let dir = self.notes_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(dir.to_native())
            .map_err(|e| notesync_fs::Error::io(dir.to_native(), e))?;
        let mut notes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| notesync_fs::Error::io(dir.to_native(), e))?;
            let path = NormalizedPath::new(entry.path());
            if path.is_hidden() || !path.as_str().ends_with(".json") {
                continue;
            }
            notes.push(read_json::<T>(&path)?);
        }
        Ok(notes)
    }

    fn load_note(&self, id: &str) -> Result<Option<NoteRecord>> {
        let path = self.note_path(id);
        if !path.is_file() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    fn save_note(&self, note: &NoteRecord) -> Result<()> {
        write_json(&self.note_path(&note.id), note)
    }
}

impl NoteService for FileNoteService {
    fn list_containers(&self) -> notesync_core::Result<Vec<Container>> {
        Ok(self.notebooks()?.iter().map(Container::from).collect())
    }

    fn create_container(&self, name: &str) -> notesync_core::Result<Container> {
        let mut notebooks = self.notebooks()?;
        if notebooks.iter().any(|nb| nb.name == name) {
            return Err(Error::DuplicateNotebook {
                name: name.to_string(),
            }
            .into());
        }

        let record = NotebookRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created: now_millis(),
        };
        let container = Container::from(&record);
        notebooks.push(record);
        self.save_notebooks(&notebooks)?;

        tracing::debug!(notebook = %name, id = %container.id, "Stored notebook");
        Ok(container)
    }

    fn list_items(&self, container: &Container) -> notesync_core::Result<Vec<RemoteItem>> {
        Ok(self
            .note_headers()?
            .iter()
            .filter(|note| note.notebook == container.id)
            .map(RemoteItem::from)
            .collect())
    }

    fn load_content(&self, item: &RemoteItem) -> notesync_core::Result<String> {
        let note = self.load_note(item.id.as_str())?.ok_or_else(|| Error::NotFound {
            kind: "Note",
            id: item.id.to_string(),
        })?;
        Ok(note.content)
    }

    fn create_item(
        &self,
        container: &Container,
        name: &str,
        content: &str,
        created: i64,
    ) -> notesync_core::Result<RemoteItem> {
        let note = NoteRecord {
            id: Uuid::new_v4().to_string(),
            title: name.to_string(),
            notebook: container.id.clone(),
            created,
            updated: now_millis(),
            content: content.to_string(),
        };
        self.save_note(&note)?;

        tracing::debug!(name = %name, id = %note.id, "Stored note");
        Ok(RemoteItem::from(&note))
    }

    fn update_item(
        &self,
        id: &NoteId,
        name: &str,
        content: &str,
        container: &Container,
    ) -> notesync_core::Result<bool> {
        let Some(mut note) = self.load_note(id.as_str())? else {
            tracing::warn!(id = %id, name = %name, "Note to update no longer exists");
            return Ok(false);
        };

        note.title = name.to_string();
        note.content = content.to_string();
        note.notebook = container.id.clone();
        note.updated = next_update(note.updated);
        self.save_note(&note)?;

        tracing::debug!(name = %name, id = %id, updated = note.updated, "Stored note");
        Ok(true)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current time, moved past `previous` so consecutive writes always differ.
fn next_update(previous: i64) -> i64 {
    now_millis().max(previous + 1)
}

fn read_json<T: DeserializeOwned>(path: &NormalizedPath) -> Result<T> {
    let content = io::read_text(path)?;
    serde_json::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_native(),
        message: e.to_string(),
    })
}

fn write_json<T: Serialize + ?Sized>(path: &NormalizedPath, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).map_err(|e| Error::Parse {
        path: path.to_native(),
        message: e.to_string(),
    })?;
    io::write_text(path, &content)?;
    Ok(())
}
