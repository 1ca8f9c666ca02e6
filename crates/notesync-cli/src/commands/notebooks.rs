//! Notebooks command implementation

use colored::Colorize;
use notesync_core::NoteService;
use notesync_store::FileNoteService;

use crate::config::Settings;
use crate::error::Result;

/// List the notebooks of the note store
pub fn run_notebooks(settings: &Settings, json: bool) -> Result<()> {
    let service = FileNoteService::open(settings.store()?, settings.token())?;
    let containers = service.list_containers()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&containers)?);
        return Ok(());
    }

    if containers.is_empty() {
        println!("No notebooks.");
        return Ok(());
    }
    for container in &containers {
        println!("   {} {}", "-".blue(), container.name);
    }
    Ok(())
}
