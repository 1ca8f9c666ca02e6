//! Sync passes over a directory/notebook binding
//!
//! This module provides:
//! - **matcher**: pair local files and remote notes by name
//! - **classify**: decide what changed since the last sync and what to do
//! - **engine**: run upload, download and snapshot update phases
//! - **conflict**: write the remote side of a conflict for manual merging

mod binding;
mod classify;
mod conflict;
mod engine;
mod matcher;
mod options;
mod report;

pub use binding::{Binding, default_notebook_name};
pub use classify::{Action, ChangeState, Freshness, classify, download_action, upload_action};
pub use conflict::artifact_path;
pub use engine::SyncEngine;
pub use matcher::{MatchedPair, Matching, match_items};
pub use options::{Policy, SyncOptions};
pub use report::PassReport;
