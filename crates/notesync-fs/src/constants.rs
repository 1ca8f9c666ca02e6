//! Reserved file names notesync keeps inside a synchronized directory.
//!
//! Every reserved name starts with a dot so that file discovery, which never
//! matches hidden files, does not pick them up as notes.

/// Mask used when no glob mask is configured.
pub const DEFAULT_MASK: &str = "*.*";

/// Extension of the per-notebook snapshot file.
pub const SNAPSHOT_EXTENSION: &str = ".mtime";

/// Extension appended to conflict artifacts.
pub const REJECT_EXTENSION: &str = ".rej";

/// Hidden files notesync writes next to the synchronized notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservedName {
    /// `.<notebook>.mtime`: the last-synced state of a notebook binding
    Snapshot { notebook: String },
    /// `.<file name>.rej`: remote content of a note in conflict
    Reject { file_name: String },
}

impl ReservedName {
    /// Snapshot file name for a notebook.
    pub fn snapshot(notebook: impl Into<String>) -> Self {
        Self::Snapshot {
            notebook: notebook.into(),
        }
    }

    /// Conflict artifact name for a local file name (with extension).
    pub fn reject(file_name: impl Into<String>) -> Self {
        Self::Reject {
            file_name: file_name.into(),
        }
    }

    /// The file name on disk.
    pub fn file_name(&self) -> String {
        match self {
            Self::Snapshot { notebook } => format!(".{}{}", notebook, SNAPSHOT_EXTENSION),
            Self::Reject { file_name } => format!(".{}{}", file_name, REJECT_EXTENSION),
        }
    }
}

impl std::fmt::Display for ReservedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_name_is_hidden() {
        let name = ReservedName::snapshot("Work");
        assert_eq!(name.file_name(), ".Work.mtime");
    }

    #[test]
    fn reject_name_keeps_file_extension() {
        let name = ReservedName::reject("todo.txt");
        assert_eq!(name.to_string(), ".todo.txt.rej");
    }
}
