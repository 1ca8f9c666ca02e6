//! Local file discovery and whole-file access
//!
//! [`FileStore`] is the seam the reconciliation engine uses for every local
//! side effect. [`LocalDir`] is the real implementation backed by a directory
//! and a glob mask.

use crate::constants::DEFAULT_MASK;
use crate::{Error, NormalizedPath, Result, io};
use glob::{MatchOptions, Pattern};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// A file found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name without extension; the identity used for matching
    pub name: String,
    /// Full path of the file
    pub path: NormalizedPath,
    /// Last modification time in milliseconds since the Unix epoch
    pub mod_time: i64,
}

/// Access to the files of one synchronized directory.
pub trait FileStore {
    /// The directory this store covers.
    fn root(&self) -> &NormalizedPath;

    /// Enumerate the files matching the store's mask. Hidden files never match.
    fn scan(&self) -> Result<Vec<FileEntry>>;

    /// Read the whole content of a file.
    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>>;

    /// Replace the whole content of a file, creating it if needed.
    fn write(&self, path: &NormalizedPath, content: &str) -> Result<()>;

    /// Whether a file exists, matched by the mask or not.
    fn exists(&self, path: &NormalizedPath) -> bool;
}

impl<T: FileStore + ?Sized> FileStore for &T {
    fn root(&self) -> &NormalizedPath {
        (**self).root()
    }

    fn scan(&self) -> Result<Vec<FileEntry>> {
        (**self).scan()
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        (**self).write(path, content)
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        (**self).exists(path)
    }
}

/// A directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDir {
    root: NormalizedPath,
    mask: String,
}

impl LocalDir {
    /// Open an existing directory with an optional glob mask (default `*.*`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] if `root` is not a directory and
    /// [`Error::InvalidMask`] if the mask is not a valid glob pattern.
    pub fn open(root: impl AsRef<Path>, mask: Option<&str>) -> Result<Self> {
        let root_path = root.as_ref();
        if !root_path.is_dir() {
            return Err(Error::DirectoryNotFound {
                path: root_path.to_path_buf(),
            });
        }

        let mask = mask
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_MASK)
            .to_string();
        Pattern::new(&mask).map_err(|e| Error::InvalidMask {
            mask: mask.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            root: NormalizedPath::new(root_path),
            mask,
        })
    }

    /// The glob mask in use.
    pub fn mask(&self) -> &str {
        &self.mask
    }

    fn pattern(&self) -> String {
        let root = Pattern::escape(self.root.as_str().trim_end_matches('/'));
        format!("{}/{}", root, self.mask)
    }
}

impl FileStore for LocalDir {
    fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn scan(&self) -> Result<Vec<FileEntry>> {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };
        let pattern = self.pattern();
        let paths = glob::glob_with(&pattern, options).map_err(|e| Error::InvalidMask {
            mask: self.mask.clone(),
            message: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }

            let normalized = NormalizedPath::new(&path);
            let Some(name) = normalized.file_stem().map(str::to_string) else {
                continue;
            };
            let mod_time = match modified_millis(&path) {
                Ok(mod_time) => mod_time,
                Err(e) => {
                    tracing::warn!(
                        path = %normalized,
                        error = %e,
                        "Skipping file without a usable modification time"
                    );
                    continue;
                }
            };
            files.push(FileEntry {
                name,
                path: normalized,
                mod_time,
            });
        }

        tracing::debug!(root = %self.root, mask = %self.mask, count = files.len(), "Scanned files");
        Ok(files)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        io::read_bytes(path)
    }

    fn write(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        io::write_text(path, content)
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        path.is_file()
    }
}

/// Modification time of a file in milliseconds since the Unix epoch.
pub fn modified_millis(path: &Path) -> Result<i64> {
    let modified = path
        .metadata()
        .and_then(|m| m.modified())
        .map_err(|e| Error::io(path, e))?;
    let since_epoch = modified
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::io(path, std::io::Error::other(e)))?;
    Ok(since_epoch.as_millis() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn open_rejects_missing_directory() {
        let dir = tempdir().unwrap();
        let result = LocalDir::open(dir.path().join("missing"), None);
        assert!(matches!(result, Err(Error::DirectoryNotFound { .. })));
    }

    #[test]
    fn open_rejects_invalid_mask() {
        let dir = tempdir().unwrap();
        let result = LocalDir::open(dir.path(), Some("[*.txt"));
        assert!(matches!(result, Err(Error::InvalidMask { .. })));
    }

    #[test]
    fn empty_mask_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let store = LocalDir::open(dir.path(), Some("  ")).unwrap();
        assert_eq!(store.mask(), DEFAULT_MASK);
    }

    #[test]
    fn scan_names_files_by_stem() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("todo.txt"), "milk").unwrap();

        let store = LocalDir::open(dir.path(), None).unwrap();
        let files = store.scan().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "todo");
        assert!(files[0].mod_time > 0);
    }
}
