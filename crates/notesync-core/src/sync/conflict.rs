//! Conflict artifacts
//!
//! When both sides changed and the user has not authorized a merge, the
//! current remote content is written next to the local file under a hidden
//! `.rej` name. Neither side and no snapshot record is touched.

use super::matcher::MatchedPair;
use crate::{NoteService, Result};
use notesync_content::Transcoder;
use notesync_fs::{FileStore, NormalizedPath, ReservedName};

/// Path of the conflict artifact for a local file.
pub fn artifact_path(root: &NormalizedPath, local_path: &NormalizedPath) -> NormalizedPath {
    let file_name = local_path.file_name().unwrap_or_default();
    root.join(&ReservedName::reject(file_name).file_name())
}

/// Write the remote side of a conflicting pair to its artifact.
pub(crate) fn write_artifact<S, F, T>(
    service: &S,
    files: &F,
    transcoder: &T,
    pair: &MatchedPair<'_>,
) -> Result<NormalizedPath>
where
    S: NoteService,
    F: FileStore,
    T: Transcoder,
{
    let markup = service.load_content(pair.remote)?;
    let text = transcoder.decode(&markup);
    let path = artifact_path(files.root(), &pair.local.path);
    files.write(&path, &text)?;

    tracing::warn!(
        name = %pair.name(),
        artifact = %path,
        "Both the file and the note changed since the last sync. \
         Merge the remote content from the artifact into the file, then rerun with --merged"
    );
    Ok(path)
}
