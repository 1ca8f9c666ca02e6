//! [`MemoryNoteService`]: an in-memory note service.

use notesync_core::{Container, Error, NoteId, NoteService, RemoteItem, Result};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// A collaborator call, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListContainers,
    CreateContainer(String),
    ListItems(String),
    LoadContent(String),
    CreateItem(String),
    UpdateItem(String),
}

impl Call {
    /// Whether the call changes remote state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateContainer(_) | Self::CreateItem(_) | Self::UpdateItem(_)
        )
    }
}

/// A note as held by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNote {
    pub id: NoteId,
    pub container_id: String,
    pub name: String,
    pub content: String,
    pub created: i64,
    pub mod_time: i64,
}

#[derive(Default)]
struct Inner {
    containers: Vec<Container>,
    notes: Vec<StoredNote>,
    calls: Vec<Call>,
    clock: i64,
    next_id: u64,
    rejected: HashSet<String>,
    failing: HashSet<String>,
}

impl Inner {
    /// Next server timestamp, later than every timestamp handed out so far.
    fn tick(&mut self) -> i64 {
        let latest = self.notes.iter().map(|n| n.mod_time).max().unwrap_or(0);
        self.clock = self.clock.max(latest) + 1;
        self.clock
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn check_failing(&self, name: &str) -> Result<()> {
        if self.failing.contains(name) {
            return Err(Error::remote(format!("service unavailable for '{}'", name)));
        }
        Ok(())
    }
}

/// Note service backed by memory that records every call.
///
/// Timestamps come from a logical clock that always moves past the largest
/// modification time in the store, so every write is observable.
///
/// # Example
///
/// ```rust,no_run
/// use notesync_test_utils::MemoryNoteService;
///
/// let service = MemoryNoteService::new();
/// service.add_container("Notes");
/// service.add_note("Notes", "todo", "<en-note>milk</en-note>", 200);
/// assert_eq!(service.mutation_count(), 0);
/// ```
#[derive(Default)]
pub struct MemoryNoteService {
    inner: Mutex<Inner>,
}

impl MemoryNoteService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Add a notebook without recording a call.
    pub fn add_container(&self, name: &str) -> Container {
        let mut inner = self.lock();
        let container = Container {
            id: inner.next_id("nb"),
            name: name.to_string(),
        };
        inner.containers.push(container.clone());
        container
    }

    /// Add a note to an existing notebook without recording a call.
    ///
    /// # Panics
    /// Panics if the notebook does not exist.
    pub fn add_note(&self, container: &str, name: &str, content: &str, mod_time: i64) -> NoteId {
        let mut inner = self.lock();
        let container_id = inner
            .containers
            .iter()
            .find(|c| c.name == container)
            .map(|c| c.id.clone())
            .unwrap_or_else(|| panic!("No notebook named {}", container));
        let id = NoteId::new(inner.next_id("note"));
        inner.notes.push(StoredNote {
            id: id.clone(),
            container_id,
            name: name.to_string(),
            content: content.to_string(),
            created: mod_time,
            mod_time,
        });
        id
    }

    /// Change the modification time of a note, as if edited elsewhere.
    pub fn set_mod_time(&self, name: &str, mod_time: i64) {
        let mut inner = self.lock();
        for note in inner.notes.iter_mut().filter(|n| n.name == name) {
            note.mod_time = mod_time;
        }
    }

    /// Edit a note from another client.
    pub fn edit_note(&self, name: &str, content: &str, mod_time: i64) {
        let mut inner = self.lock();
        for note in inner.notes.iter_mut().filter(|n| n.name == name) {
            note.content = content.to_string();
            note.mod_time = mod_time;
        }
    }

    /// Make `update_item` report that the update was not applied.
    pub fn reject_updates(&self, name: &str) {
        self.lock().rejected.insert(name.to_string());
    }

    /// Make every call concerning `name` fail.
    pub fn fail_on(&self, name: &str) {
        self.lock().failing.insert(name.to_string());
    }

    /// First note with this title.
    pub fn note(&self, name: &str) -> Option<StoredNote> {
        self.lock().notes.iter().find(|n| n.name == name).cloned()
    }

    pub fn notes(&self) -> Vec<StoredNote> {
        self.lock().notes.clone()
    }

    pub fn containers(&self) -> Vec<Container> {
        self.lock().containers.clone()
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of calls that changed remote state.
    pub fn mutation_count(&self) -> usize {
        self.lock().calls.iter().filter(|c| c.is_mutation()).count()
    }

    /// Number of recorded calls equal to `call`.
    pub fn count(&self, call: &Call) -> usize {
        self.lock().calls.iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}

impl NoteService for MemoryNoteService {
    fn list_containers(&self) -> Result<Vec<Container>> {
        let mut inner = self.lock();
        inner.calls.push(Call::ListContainers);
        Ok(inner.containers.clone())
    }

    fn create_container(&self, name: &str) -> Result<Container> {
        let mut inner = self.lock();
        inner.calls.push(Call::CreateContainer(name.to_string()));
        let container = Container {
            id: inner.next_id("nb"),
            name: name.to_string(),
        };
        inner.containers.push(container.clone());
        Ok(container)
    }

    fn list_items(&self, container: &Container) -> Result<Vec<RemoteItem>> {
        let mut inner = self.lock();
        inner.calls.push(Call::ListItems(container.name.clone()));
        Ok(inner
            .notes
            .iter()
            .filter(|n| n.container_id == container.id)
            .map(|n| RemoteItem {
                id: n.id.clone(),
                name: n.name.clone(),
                mod_time: n.mod_time,
            })
            .collect())
    }

    fn load_content(&self, item: &RemoteItem) -> Result<String> {
        let mut inner = self.lock();
        inner.calls.push(Call::LoadContent(item.name.clone()));
        inner.check_failing(&item.name)?;
        inner
            .notes
            .iter()
            .find(|n| n.id == item.id)
            .map(|n| n.content.clone())
            .ok_or_else(|| Error::remote(format!("note {} not found", item.id)))
    }

    fn create_item(
        &self,
        container: &Container,
        name: &str,
        content: &str,
        created: i64,
    ) -> Result<RemoteItem> {
        let mut inner = self.lock();
        inner.calls.push(Call::CreateItem(name.to_string()));
        inner.check_failing(name)?;

        let id = NoteId::new(inner.next_id("note"));
        let mod_time = inner.tick();
        inner.notes.push(StoredNote {
            id: id.clone(),
            container_id: container.id.clone(),
            name: name.to_string(),
            content: content.to_string(),
            created,
            mod_time,
        });
        Ok(RemoteItem {
            id,
            name: name.to_string(),
            mod_time,
        })
    }

    fn update_item(
        &self,
        id: &NoteId,
        name: &str,
        content: &str,
        container: &Container,
    ) -> Result<bool> {
        let mut inner = self.lock();
        inner.calls.push(Call::UpdateItem(name.to_string()));
        inner.check_failing(name)?;
        if inner.rejected.contains(name) {
            return Ok(false);
        }

        let mod_time = inner.tick();
        let Some(note) = inner.notes.iter_mut().find(|n| &n.id == id) else {
            return Err(Error::remote(format!("note {} not found", id)));
        };
        note.name = name.to_string();
        note.content = content.to_string();
        note.container_id = container.id.clone();
        note.mod_time = mod_time;
        Ok(true)
    }
}
