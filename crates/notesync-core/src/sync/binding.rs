//! Binding of a local directory to a remote notebook

use crate::snapshot::SnapshotStore;
use crate::{Container, Error, NoteService, Result};
use notesync_fs::{NormalizedPath, validate_item_name};

/// One `(directory, notebook)` pair and the snapshot it owns
#[derive(Debug, Clone)]
pub struct Binding {
    notebook: String,
    /// `None` only in dry-run, when the notebook would have been created
    container: Option<Container>,
    snapshot: SnapshotStore,
}

impl Binding {
    /// Resolve the notebook for `directory`, creating it if it does not exist.
    ///
    /// Without an explicit name the notebook is named after the directory,
    /// with symlinks resolved.
    pub fn establish<S: NoteService>(
        service: &S,
        directory: &NormalizedPath,
        notebook: Option<&str>,
        dry_run: bool,
    ) -> Result<Self> {
        let name = match notebook.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                validate_item_name(name)
                    .map_err(|e| Error::config(format!("Invalid notebook name: {}", e)))?;
                name.to_string()
            }
            None => default_notebook_name(directory)?,
        };

        let container = match service.find_container(&name)? {
            Some(container) => Some(container),
            None if dry_run => {
                tracing::info!(notebook = %name, "[dry-run] Would create notebook");
                None
            }
            None => {
                let container = service.create_container(&name)?;
                tracing::info!(notebook = %name, id = %container.id, "Created notebook");
                Some(container)
            }
        };

        Ok(Self {
            snapshot: SnapshotStore::for_binding(directory, &name),
            notebook: name,
            container,
        })
    }

    pub fn notebook(&self) -> &str {
        &self.notebook
    }

    pub fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    pub fn snapshot(&self) -> &SnapshotStore {
        &self.snapshot
    }
}

/// Base name of a directory after resolving symlinks.
pub fn default_notebook_name(directory: &NormalizedPath) -> Result<String> {
    let resolved = dunce::canonicalize(directory.to_native()).map_err(|e| {
        Error::config(format!("Cannot resolve directory {}: {}", directory, e))
    })?;

    resolved
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::config(format!(
                "Cannot derive a notebook name from {}",
                resolved.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_name_is_directory_base_name() {
        let dir = tempdir().unwrap();
        let notes = dir.path().join("Work Notes");
        std::fs::create_dir(&notes).unwrap();

        let name = default_notebook_name(&NormalizedPath::new(&notes)).unwrap();
        assert_eq!(name, "Work Notes");
    }

    #[cfg(unix)]
    #[test]
    fn default_name_follows_symlinks() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("Journal");
        std::fs::create_dir(&target).unwrap();
        let link = dir.path().join("current");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let name = default_notebook_name(&NormalizedPath::new(&link)).unwrap();
        assert_eq!(name, "Journal");
    }

    #[test]
    fn missing_directory_is_a_config_error() {
        let dir = tempdir().unwrap();
        let err = default_notebook_name(&NormalizedPath::new(dir.path().join("gone"))).unwrap_err();
        assert!(err.is_fatal());
    }
}
