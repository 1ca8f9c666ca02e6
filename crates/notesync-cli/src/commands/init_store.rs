//! Init-store command implementation

use colored::Colorize;
use notesync_store::FileNoteService;

use crate::config::Settings;
use crate::error::Result;

/// Create an empty note store at the configured location
pub fn run_init_store(settings: &Settings) -> Result<()> {
    let store = settings.store()?;
    FileNoteService::init(store, settings.token().unwrap_or_default())?;

    println!(
        "{} Created note store at {}",
        "OK".green().bold(),
        store.display().to_string().cyan()
    );
    Ok(())
}
