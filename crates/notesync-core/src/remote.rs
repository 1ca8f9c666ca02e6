//! Contract with the remote note service
//!
//! The engine never talks to a concrete service. Everything remote goes
//! through [`NoteService`], so the same pass logic drives the bundled
//! directory-backed store, a network client, or a test double.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a note on the remote side
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A remote notebook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Service-assigned identifier
    pub id: String,
    /// Display name; the identity used for binding a directory
    pub name: String,
}

/// A note as listed by the service, without its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub id: NoteId,
    /// Note title; the identity used for matching
    pub name: String,
    /// Last modification time in milliseconds since the Unix epoch
    pub mod_time: i64,
}

/// Operations the engine needs from a note service.
///
/// Calls are blocking round trips. Implementations own any retry policy.
pub trait NoteService {
    /// List every notebook.
    fn list_containers(&self) -> Result<Vec<Container>>;

    /// Find a notebook by exact name.
    fn find_container(&self, name: &str) -> Result<Option<Container>> {
        Ok(self
            .list_containers()?
            .into_iter()
            .find(|container| container.name == name))
    }

    /// Create a notebook.
    fn create_container(&self, name: &str) -> Result<Container>;

    /// List the notes of a notebook. Content is not loaded.
    fn list_items(&self, container: &Container) -> Result<Vec<RemoteItem>>;

    /// Load the markup content of a note.
    fn load_content(&self, item: &RemoteItem) -> Result<String>;

    /// Create a note; `created` is a timestamp in milliseconds.
    fn create_item(
        &self,
        container: &Container,
        name: &str,
        content: &str,
        created: i64,
    ) -> Result<RemoteItem>;

    /// Replace the title and content of a note. Returns `false` when the
    /// service did not apply the update.
    fn update_item(
        &self,
        id: &NoteId,
        name: &str,
        content: &str,
        container: &Container,
    ) -> Result<bool>;
}

impl<T: NoteService + ?Sized> NoteService for &T {
    fn list_containers(&self) -> Result<Vec<Container>> {
        (**self).list_containers()
    }

    fn find_container(&self, name: &str) -> Result<Option<Container>> {
        (**self).find_container(name)
    }

    fn create_container(&self, name: &str) -> Result<Container> {
        (**self).create_container(name)
    }

    fn list_items(&self, container: &Container) -> Result<Vec<RemoteItem>> {
        (**self).list_items(container)
    }

    fn load_content(&self, item: &RemoteItem) -> Result<String> {
        (**self).load_content(item)
    }

    fn create_item(
        &self,
        container: &Container,
        name: &str,
        content: &str,
        created: i64,
    ) -> Result<RemoteItem> {
        (**self).create_item(container, name, content, created)
    }

    fn update_item(
        &self,
        id: &NoteId,
        name: &str,
        content: &str,
        container: &Container,
    ) -> Result<bool> {
        (**self).update_item(id, name, content, container)
    }
}
