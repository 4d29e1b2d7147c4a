//! Directory entries as seen by the tree walker

use std::ffi::OsString;
use std::fs::{FileType, Metadata};
use std::path::PathBuf;

/// Kind of a directory entry, taken without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,

    /// Directory
    Directory,

    /// Anything else (symlinks, sockets, pipes, devices)
    Other,
}

impl EntryKind {
    /// Classify a file type
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        }
    }

    /// Classify from `symlink_metadata`
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self::from_file_type(metadata.file_type())
    }
}

/// A single name inside a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// One directory visited by the walker, with its immediate children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// Absolute (or root-relative, as given) path of the directory
    pub path: PathBuf,

    /// Path relative to the walk root; empty for the root itself
    pub relative: PathBuf,

    /// Immediate children, sorted by name
    pub entries: Vec<DirEntry>,
}

impl DirListing {
    /// Iterator over the child names
    pub fn names(&self) -> impl Iterator<Item = &std::ffi::OsStr> {
        self.entries.iter().map(|e| e.name.as_os_str())
    }

    /// Iterator over the child directories
    pub fn subdirs(&self) -> impl Iterator<Item = &DirEntry> {
        self.entries.iter().filter(|e| e.is_dir())
    }
}
