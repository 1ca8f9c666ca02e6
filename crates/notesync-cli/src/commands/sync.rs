//! Sync command implementation
//!
//! Runs one pass for a single directory, or one pass per notebook with
//! `--all`.

use std::path::Path;

use colored::Colorize;

use notesync_core::{NoteService, PassReport, SyncEngine, SyncOptions};
use notesync_fs::{LocalDir, validate_item_name};
use notesync_store::FileNoteService;

use crate::cli::SyncArgs;
use crate::config::Settings;
use crate::error::{CliError, Result};

/// Run the sync command
pub fn run_sync(settings: &Settings, args: &SyncArgs) -> Result<()> {
    let path = args.path.as_deref().ok_or_else(|| {
        CliError::config("Path to the directory to synchronize is required (--path)")
    })?;
    if !path.is_dir() {
        return Err(CliError::config(format!(
            "Directory does not exist: {}",
            path.display()
        )));
    }

    let service = FileNoteService::open(settings.store()?, settings.token())?;

    if args.all {
        run_all(&service, settings, args, path)
    } else {
        let report = run_binding(&service, settings, args, path, args.notebook.as_deref())?;
        print_report(&report, args.json)
    }
}

/// One pass per notebook, each into `path/<notebook>/`.
///
/// A failing notebook is reported and the next one is processed.
fn run_all(service: &FileNoteService, settings: &Settings, args: &SyncArgs, path: &Path) -> Result<()> {
    let containers = service.list_containers()?;
    let mut failed = Vec::new();

    for container in &containers {
        if let Err(e) = validate_item_name(&container.name) {
            tracing::warn!(notebook = %container.name, error = %e, "Skipping notebook");
            failed.push(container.name.clone());
            continue;
        }

        let dir = path.join(&container.name);
        let result = std::fs::create_dir_all(&dir)
            .map_err(CliError::from)
            .and_then(|_| run_binding(service, settings, args, &dir, Some(&container.name)));

        match result {
            Ok(report) => print_report(&report, args.json)?,
            Err(e) => {
                tracing::error!(notebook = %container.name, error = %e, "Notebook sync failed");
                eprintln!("{} {}: {}", "error".red().bold(), container.name, e);
                failed.push(container.name.clone());
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} of {} notebooks failed: {}",
            failed.len(),
            containers.len(),
            failed.join(", ")
        )))
    }
}

fn run_binding(
    service: &FileNoteService,
    settings: &Settings,
    args: &SyncArgs,
    dir: &Path,
    notebook: Option<&str>,
) -> Result<PassReport> {
    let files = LocalDir::open(dir, settings.mask.as_deref())?;
    let options = SyncOptions::default()
        .with_format(settings.format)
        .with_merge_authorized(args.merged)
        .with_dry_run(args.dry_run);

    let engine = SyncEngine::new(service, files, notebook, options)?;
    Ok(engine.run_pass(args.policy())?)
}

fn print_report(report: &PassReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{} Synchronized notebook {} ({})",
        "=>".blue().bold(),
        report.notebook.cyan(),
        report.policy
    );

    if report.actions.is_empty() {
        println!("{} Already synchronized. No changes needed.", "OK".green().bold());
    } else {
        for action in &report.actions {
            println!("   {} {}", "+".green(), action);
        }
    }

    if !report.conflicts.is_empty() {
        println!(
            "{} {} conflict(s): {}",
            "CONFLICT".yellow().bold(),
            report.conflicts.len(),
            report.conflicts.join(", ")
        );
        println!(
            "Merge the hidden .rej files into your notes, then rerun with {}.",
            "--merged".cyan()
        );
    }

    if !report.success() {
        println!("{} Some items were skipped:", "WARN".yellow().bold());
        for error in &report.errors {
            println!("   {} {}", "!".yellow(), error);
        }
    }

    Ok(())
}
