//! Core type definitions for mirrorloop

mod action;
mod entry;
mod error;

pub use action::SyncAction;
pub use entry::{DirEntry, DirListing, EntryKind};
pub use error::SyncError;
