//! Last-synced state of one name

use serde::{Deserialize, Serialize};

/// Modification times of both sides at the end of the last successful sync
/// of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRecord {
    /// Local file modification time in milliseconds
    pub file_mod_time: i64,
    /// Remote note modification time in milliseconds
    pub note_mod_time: i64,
}

impl SyncRecord {
    pub fn new(file_mod_time: i64, note_mod_time: i64) -> Self {
        Self {
            file_mod_time,
            note_mod_time,
        }
    }

    /// Whether both timestamps carry a real value.
    ///
    /// A zero timestamp never comes from a real sync, so such a record is
    /// treated as if no snapshot existed.
    pub fn is_complete(&self) -> bool {
        self.file_mod_time != 0 && self.note_mod_time != 0
    }
}
