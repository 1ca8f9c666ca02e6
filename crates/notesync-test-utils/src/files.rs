//! [`MemoryFileStore`]: file contents in memory, snapshot on disk.

use notesync_fs::{Error, FileEntry, FileStore, NormalizedPath, Result};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

#[derive(Debug, Clone)]
struct MemoryFile {
    content: Vec<u8>,
    mod_time: i64,
}

#[derive(Default)]
struct Inner {
    files: BTreeMap<String, MemoryFile>,
    writes: Vec<String>,
    clock: i64,
}

/// A directory whose files live in memory with settable modification times.
///
/// The root is a real, empty temporary directory named `Notes` so the
/// snapshot file, which the engine writes directly, has somewhere to go.
/// Files are keyed by file name; hidden names are stored but never scanned.
pub struct MemoryFileStore {
    _temp_dir: TempDir,
    root: NormalizedPath,
    inner: Mutex<Inner>,
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileStore {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("Notes");
        std::fs::create_dir(&root).unwrap();
        Self {
            root: NormalizedPath::new(&root),
            _temp_dir: temp_dir,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Add or replace a file without recording a write.
    pub fn add(&self, file_name: &str, content: impl Into<Vec<u8>>, mod_time: i64) {
        self.lock().files.insert(
            file_name.to_string(),
            MemoryFile {
                content: content.into(),
                mod_time,
            },
        );
    }

    /// Change the modification time of a file, as if edited elsewhere.
    pub fn set_mod_time(&self, file_name: &str, mod_time: i64) {
        if let Some(file) = self.lock().files.get_mut(file_name) {
            file.mod_time = mod_time;
        }
    }

    pub fn content(&self, file_name: &str) -> Option<String> {
        self.lock()
            .files
            .get(file_name)
            .map(|f| String::from_utf8_lossy(&f.content).into_owned())
    }

    pub fn mod_time(&self, file_name: &str) -> Option<i64> {
        self.lock().files.get(file_name).map(|f| f.mod_time)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.lock().files.contains_key(file_name)
    }

    /// File names passed to `write`, in order.
    pub fn writes(&self) -> Vec<String> {
        self.lock().writes.clone()
    }

    /// Full path of a file name under the root.
    pub fn path(&self, file_name: &str) -> NormalizedPath {
        self.root.join(file_name)
    }

    /// Snapshot file of a notebook, read from disk.
    pub fn snapshot_bytes(&self, notebook: &str) -> Option<Vec<u8>> {
        std::fs::read(self.root.to_native().join(format!(".{}.mtime", notebook))).ok()
    }

    fn key(&self, path: &NormalizedPath) -> Result<String> {
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) if parent == self.root => Ok(name.to_string()),
            _ => Err(Error::io(
                path.to_native(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "outside the store root"),
            )),
        }
    }
}

impl FileStore for MemoryFileStore {
    fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn scan(&self) -> Result<Vec<FileEntry>> {
        let inner = self.lock();
        Ok(inner
            .files
            .iter()
            .filter(|(name, _)| !name.starts_with('.'))
            .filter_map(|(name, file)| {
                let path = self.root.join(name);
                let stem = path.file_stem()?.to_string();
                Some(FileEntry {
                    name: stem,
                    path,
                    mod_time: file.mod_time,
                })
            })
            .collect())
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        let key = self.key(path)?;
        self.lock()
            .files
            .get(&key)
            .map(|f| f.content.clone())
            .ok_or_else(|| {
                Error::io(
                    path.to_native(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                )
            })
    }

    fn write(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        let key = self.key(path)?;
        let mut inner = self.lock();
        let latest = inner.files.values().map(|f| f.mod_time).max().unwrap_or(0);
        inner.clock = inner.clock.max(latest) + 1;
        let mod_time = inner.clock;
        inner.writes.push(key.clone());
        inner.files.insert(
            key,
            MemoryFile {
                content: content.as_bytes().to_vec(),
                mod_time,
            },
        );
        Ok(())
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        self.key(path)
            .map(|key| self.lock().files.contains_key(&key))
            .unwrap_or(false)
    }
}
