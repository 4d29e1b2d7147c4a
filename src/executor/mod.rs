//! Selective copier: mirrors the immediate children of one directory

pub mod copy;

use crate::diff::compare_mtimes;
use crate::types::{EntryKind, SyncAction, SyncError};
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

pub use copy::copy_file;

/// Counters for one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Source directories whose entries were processed
    pub dirs_visited: usize,
    /// Destination directories created
    pub dirs_created: usize,
    /// Files copied because the destination was missing
    pub files_created: usize,
    /// Files copied because the source was newer
    pub files_updated: usize,
    /// Files left alone
    pub files_skipped: usize,
    /// Entries that are neither files nor directories
    pub entries_ignored: usize,
    /// Aggregate copied bytes
    pub bytes_copied: u64,
    /// Entries that failed
    pub failures: usize,
}

impl PassStats {
    /// Files actually transferred
    pub fn files_copied(&self) -> usize {
        self.files_created + self.files_updated
    }
}

/// Mirrors directory entries into a destination, one directory at a time
///
/// Never descends on its own: the caller feeds it every directory of the
/// tree. Failures on single entries are logged, collected and skipped.
#[derive(Debug, Default)]
pub struct SelectiveCopier {
    stats: PassStats,
    errors: Vec<SyncError>,
}

impl SelectiveCopier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &PassStats {
        &self.stats
    }

    /// Errors collected so far
    pub fn errors(&self) -> &[SyncError] {
        &self.errors
    }

    /// Record a failure that happened outside the copier (e.g. while walking)
    pub fn record_error(&mut self, error: SyncError) {
        warn!("{}", error);
        self.stats.failures += 1;
        self.errors.push(error);
    }

    /// Consume the copier, returning stats and errors
    pub fn finish(self) -> (PassStats, Vec<SyncError>) {
        (self.stats, self.errors)
    }

    /// Mirror the named children of `src_dir` into `dest_dir`
    ///
    /// Files are copied when the destination is missing or strictly older.
    /// Missing destination directories are created. Anything else is ignored.
    ///
    /// Returns the source paths of subdirectories whose destination could not
    /// be created; their subtrees cannot be mirrored this pass.
    pub fn mirror_entries<'a, I>(
        &mut self,
        src_dir: &Path,
        dest_dir: &Path,
        names: I,
    ) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = &'a OsStr>,
    {
        self.stats.dirs_visited += 1;
        let mut blocked = Vec::new();

        for name in names {
            let src_path = src_dir.join(name);
            let dest_path = dest_dir.join(name);

            let metadata = match fs::symlink_metadata(&src_path) {
                Ok(m) => m,
                Err(source) => {
                    self.record_error(SyncError::FilesystemAccess {
                        path: src_path,
                        source,
                    });
                    continue;
                }
            };

            match EntryKind::from_metadata(&metadata) {
                EntryKind::File => {
                    let src_mtime = match metadata.modified() {
                        Ok(t) => t,
                        Err(source) => {
                            self.record_error(SyncError::FilesystemAccess {
                                path: src_path,
                                source,
                            });
                            continue;
                        }
                    };
                    self.mirror_file(&src_path, &dest_path, src_mtime, name, src_dir, dest_dir);
                }
                EntryKind::Directory => {
                    if let Err(error) = self.ensure_dir(&dest_path) {
                        self.record_error(error);
                        blocked.push(src_path);
                    }
                }
                EntryKind::Other => {
                    debug!("Ignoring {} (not a regular file or directory)", src_path.display());
                    self.stats.entries_ignored += 1;
                }
            }
        }

        blocked
    }

    fn mirror_file(
        &mut self,
        src_path: &Path,
        dest_path: &Path,
        src_mtime: SystemTime,
        name: &OsStr,
        src_dir: &Path,
        dest_dir: &Path,
    ) {
        let dest_mtime = match fs::metadata(dest_path) {
            Ok(m) => match m.modified() {
                Ok(t) => Some(t),
                Err(source) => {
                    self.record_error(SyncError::FilesystemAccess {
                        path: dest_path.to_path_buf(),
                        source,
                    });
                    return;
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(source) => {
                self.record_error(SyncError::FilesystemAccess {
                    path: dest_path.to_path_buf(),
                    source,
                });
                return;
            }
        };

        let action = compare_mtimes(src_mtime, dest_mtime);
        if !action.is_copy() {
            self.stats.files_skipped += 1;
            return;
        }

        match copy_file(src_path, dest_path) {
            Ok(bytes) => {
                info!(
                    "Copied file {} from {} to {} ({})",
                    name.to_string_lossy(),
                    src_dir.display(),
                    dest_dir.display(),
                    action.name()
                );
                self.stats.bytes_copied += bytes;
                match action {
                    SyncAction::CopyNew => self.stats.files_created += 1,
                    _ => self.stats.files_updated += 1,
                }
            }
            Err(error) => self.record_error(error),
        }
    }

    fn ensure_dir(&mut self, dest_path: &Path) -> Result<(), SyncError> {
        if dest_path.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(dest_path).map_err(|source| SyncError::DirectoryCreation {
            path: dest_path.to_path_buf(),
            source,
        })?;
        debug!("Created directory {}", dest_path.display());
        self.stats.dirs_created += 1;
        Ok(())
    }
}
