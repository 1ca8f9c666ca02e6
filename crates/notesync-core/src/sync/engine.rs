//! SyncEngine implementation
//!
//! The SyncEngine runs sync passes over one directory/notebook binding. A pass
//! uploads, downloads, then records what it touched in the snapshot.

use std::collections::HashSet;

use notesync_content::{NoteMarkup, Transcoder, strip_control_chars};
use notesync_fs::{FileStore, NormalizedPath, validate_item_name};

use crate::snapshot::{SyncRecord, SyncState};
use crate::{Container, Error, LocalItem, NoteService, RemoteItem, Result};

use super::binding::Binding;
use super::classify::{Action, classify, download_action, upload_action};
use super::conflict::write_artifact;
use super::matcher::{MatchedPair, Matching, match_items};
use super::options::{Policy, SyncOptions};
use super::report::PassReport;

/// Engine for reconciling a directory with a notebook
///
/// The engine owns its collaborators: a [`NoteService`] for the remote side,
/// a [`FileStore`] for the local side and a [`Transcoder`] between the two.
/// Passes are sequential; running two engines over the same binding at the
/// same time is not supported.
pub struct SyncEngine<S, F, T = NoteMarkup> {
    service: S,
    files: F,
    transcoder: T,
    binding: Binding,
    options: SyncOptions,
}

impl<S: NoteService, F: FileStore> SyncEngine<S, F, NoteMarkup> {
    /// Create an engine with the default markup transcoder.
    ///
    /// # Arguments
    ///
    /// * `service` - The remote note service
    /// * `files` - The local directory
    /// * `notebook` - Notebook name; defaults to the directory's base name
    /// * `options` - Format, merge authorization and dry-run
    ///
    /// # Errors
    ///
    /// Returns an error if the notebook cannot be found or created.
    pub fn new(service: S, files: F, notebook: Option<&str>, options: SyncOptions) -> Result<Self> {
        Self::with_transcoder(service, files, NoteMarkup::new(), notebook, options)
    }
}

impl<S: NoteService, F: FileStore, T: Transcoder> SyncEngine<S, F, T> {
    /// Create an engine with a custom transcoder.
    pub fn with_transcoder(
        service: S,
        files: F,
        transcoder: T,
        notebook: Option<&str>,
        options: SyncOptions,
    ) -> Result<Self> {
        let binding = Binding::establish(&service, files.root(), notebook, options.dry_run)?;
        tracing::debug!(
            directory = %files.root(),
            notebook = %binding.notebook(),
            "Bound directory to notebook"
        );

        Ok(Self {
            service,
            files,
            transcoder,
            binding,
            options,
        })
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Run one sync pass.
    ///
    /// Per-item failures are logged and collected in the report. Snapshot,
    /// listing and configuration failures abort the pass; in that case the
    /// snapshot is not written.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded or saved, or if
    /// either side cannot be listed.
    pub fn run_pass(&self, policy: Policy) -> Result<PassReport> {
        let mut state = self.binding.snapshot().load()?;
        let mut report = PassReport::new(self.binding.notebook(), policy, self.options.dry_run);

        tracing::info!(
            notebook = %self.binding.notebook(),
            directory = %self.files.root(),
            policy = %policy,
            dry_run = self.options.dry_run,
            "Starting sync pass"
        );

        let local = self.files.scan()?;
        let remote = self.list_remote()?;
        let matching = match_items(&local, &remote);
        warn_duplicates(&matching);

        let mut handled = HashSet::new();
        let mut created_remote = Vec::new();

        if policy.upload_enabled() {
            self.upload(&matching, &state, &mut handled, &mut created_remote, &mut report)?;
        }

        if policy.download_enabled() {
            let mut remote_now = remote.clone();
            remote_now.extend(created_remote);
            let matching = match_items(&local, &remote_now);
            self.download(&matching, &state, &handled, &mut report)?;
        }

        if !self.options.dry_run {
            self.refresh_records(&mut state, &report)?;
            self.binding.snapshot().save(&state)?;
        }

        tracing::info!(
            notebook = %self.binding.notebook(),
            updated = report.updated.len(),
            conflicts = report.conflicts.len(),
            errors = report.errors.len(),
            records = state.len(),
            "Sync pass complete"
        );
        Ok(report)
    }

    fn upload<'a>(
        &self,
        matching: &Matching<'a>,
        state: &SyncState,
        handled: &mut HashSet<&'a str>,
        created: &mut Vec<RemoteItem>,
        report: &mut PassReport,
    ) -> Result<()> {
        for pair in &matching.pairs {
            let change = classify(pair.local.mod_time, pair.remote.mod_time, state.get(pair.name()));
            let action = upload_action(change, self.options.merge_authorized);
            tracing::debug!(name = %pair.name(), change = %change, action = ?action, "Classified for upload");

            let result = match action {
                Action::Push => self.push(pair, report),
                Action::Conflict => self.conflict(pair, report),
                Action::Skip | Action::Pull => continue,
            };
            handled.insert(pair.name());
            settle(report, pair.name(), result)?;
        }

        for &item in &matching.local_only {
            handled.insert(item.name.as_str());
            let result = self.create_remote(item, report).map(|note| {
                created.extend(note);
                true
            });
            settle(report, &item.name, result)?;
        }

        Ok(())
    }

    fn download(
        &self,
        matching: &Matching<'_>,
        state: &SyncState,
        handled: &HashSet<&str>,
        report: &mut PassReport,
    ) -> Result<()> {
        for pair in &matching.pairs {
            if handled.contains(pair.name()) {
                continue;
            }
            let change = classify(pair.local.mod_time, pair.remote.mod_time, state.get(pair.name()));
            let action = download_action(change, self.options.merge_authorized);
            tracing::debug!(name = %pair.name(), change = %change, action = ?action, "Classified for download");

            let result = match action {
                Action::Pull => self.pull(pair, report),
                Action::Conflict => self.conflict(pair, report),
                Action::Skip | Action::Push => continue,
            };
            settle(report, pair.name(), result)?;
        }

        for item in &matching.remote_only {
            if handled.contains(item.name.as_str()) {
                continue;
            }
            let result = self.create_local(item, report);
            settle(report, &item.name, result)?;
        }

        Ok(())
    }

    /// Replace the note with the local file.
    fn push(&self, pair: &MatchedPair<'_>, report: &mut PassReport) -> Result<bool> {
        let name = pair.name();
        let content = self.read_local(pair.local)?;

        if !self.options.dry_run {
            let applied =
                self.service
                    .update_item(&pair.remote.id, name, &content, self.container()?)?;
            if !applied {
                return Err(Error::NotUpdated {
                    name: name.to_string(),
                });
            }
            tracing::info!(name = %name, "Note updated");
        }

        report.action(
            format!("Updated note '{}'", name),
            format!("update note '{}'", name),
        );
        Ok(true)
    }

    /// Replace the local file with the note.
    fn pull(&self, pair: &MatchedPair<'_>, report: &mut PassReport) -> Result<bool> {
        let name = pair.name();

        if !self.options.dry_run {
            let markup = self.service.load_content(pair.remote)?;
            let text = self.transcoder.decode(&markup);
            self.files.write(&pair.local.path, &text)?;
            tracing::info!(name = %name, path = %pair.local.path, "File updated");
        }

        report.action(
            format!("Updated file '{}'", pair.local.path),
            format!("update file '{}'", pair.local.path),
        );
        Ok(true)
    }

    fn conflict(&self, pair: &MatchedPair<'_>, report: &mut PassReport) -> Result<bool> {
        let name = pair.name();

        if self.options.dry_run {
            tracing::warn!(name = %name, "[dry-run] Conflict: both the file and the note changed");
        } else {
            write_artifact(&self.service, &self.files, &self.transcoder, pair)?;
        }

        report.action(
            format!("Conflict on '{}': remote content saved for manual merge", name),
            format!("save remote content of '{}' for manual merge", name),
        );
        report.conflicts.push(name.to_string());
        Ok(false)
    }

    /// Create a note for a file without one. Returns the created note.
    fn create_remote(&self, item: &LocalItem, report: &mut PassReport) -> Result<Option<RemoteItem>> {
        let content = self.read_local(item)?;

        let created = if self.options.dry_run {
            None
        } else {
            let note = self
                .service
                .create_item(self.container()?, &item.name, &content, item.mod_time)?;
            tracing::info!(name = %item.name, id = %note.id, "Note created");
            Some(note)
        };

        report.action(
            format!("Created note '{}'", item.name),
            format!("create note '{}'", item.name),
        );
        Ok(created)
    }

    /// Create a file for a note without one.
    fn create_local(&self, item: &RemoteItem, report: &mut PassReport) -> Result<bool> {
        validate_item_name(&item.name)?;
        let path = self.local_path_for(&item.name);

        if self.files.exists(&path) {
            tracing::warn!(
                name = %item.name,
                path = %path,
                "File exists but is not matched by the mask; not overwriting"
            );
            return Ok(false);
        }

        if !self.options.dry_run {
            let markup = self.service.load_content(item)?;
            let text = self.transcoder.decode(&markup);
            self.files.write(&path, &text)?;
            tracing::info!(name = %item.name, path = %path, "File created");
        }

        report.action(
            format!("Created file '{}'", path),
            format!("create file '{}'", path),
        );
        Ok(true)
    }

    /// Store fresh records for every touched name present on both sides.
    fn refresh_records(&self, state: &mut SyncState, report: &PassReport) -> Result<()> {
        if report.updated.is_empty() {
            return Ok(());
        }

        let local = self.files.scan()?;
        let remote = self.list_remote()?;
        let matching = match_items(&local, &remote);
        for pair in &matching.pairs {
            if report.updated.contains(pair.name()) {
                let record = SyncRecord::new(pair.local.mod_time, pair.remote.mod_time);
                tracing::debug!(name = %pair.name(), ?record, "Recorded sync state");
                state.insert(pair.name(), record);
            }
        }
        Ok(())
    }

    /// Read a local file and convert it to note markup.
    fn read_local(&self, item: &LocalItem) -> Result<String> {
        let bytes = self.files.read(&item.path)?;
        let text = String::from_utf8(bytes).map_err(|_| Error::Encoding {
            name: item.name.clone(),
            message: format!("{} is not valid UTF-8", item.path),
        })?;

        self.transcoder
            .encode(&strip_control_chars(&text), self.options.format)
            .map_err(|e| Error::Encoding {
                name: item.name.clone(),
                message: e.to_string(),
            })
    }

    fn list_remote(&self) -> Result<Vec<RemoteItem>> {
        match self.binding.container() {
            Some(container) => self.service.list_items(container),
            None => Ok(Vec::new()),
        }
    }

    fn container(&self) -> Result<&Container> {
        self.binding.container().ok_or_else(|| {
            Error::config(format!("Notebook '{}' does not exist", self.binding.notebook()))
        })
    }

    fn local_path_for(&self, name: &str) -> NormalizedPath {
        self.files
            .root()
            .join(&format!("{}{}", name, self.options.format.extension()))
    }
}

/// Item boundary of a pass.
///
/// Non-fatal errors are logged and collected; the pass continues. `Ok(true)`
/// marks the name as touched so its record is refreshed.
fn settle(report: &mut PassReport, name: &str, result: Result<bool>) -> Result<()> {
    match result {
        Ok(true) => {
            report.updated.insert(name.to_string());
            Ok(())
        }
        Ok(false) => Ok(()),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::warn!(name = %name, kind = ?e.kind(), error = %e, "Skipping item");
            report.errors.push(format!("{}: {}", name, e));
            Ok(())
        }
    }
}

fn warn_duplicates(matching: &Matching<'_>) {
    for item in &matching.duplicate_local {
        tracing::warn!(name = %item.name, path = %item.path, "Duplicate file name; skipping");
    }
    for item in &matching.duplicate_remote {
        tracing::warn!(name = %item.name, id = %item.id, "Duplicate note title; skipping");
    }
}
