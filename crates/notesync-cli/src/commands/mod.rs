//! Command implementations for notesync-cli

pub mod init_store;
pub mod notebooks;
pub mod sync;

pub use init_store::run_init_store;
pub use notebooks::run_notebooks;
pub use sync::run_sync;
