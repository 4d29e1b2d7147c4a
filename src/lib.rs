//! # mirrorloop - Periodic one-way directory mirror
//!
//! Every tick, walks a source tree and copies each file whose modification
//! time is newer than its counterpart in the destination tree (or whose
//! counterpart is missing). Nothing is ever deleted from the destination.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod scanner;
pub mod schedule;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::{Cli, Config};
pub use types::{DirEntry, DirListing, EntryKind, SyncAction, SyncError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
