//! One sync pass over the whole source tree

use crate::executor::{PassStats, SelectiveCopier};
use crate::scanner::walk_tree;
use crate::types::{DirListing, SyncError};
use crate::Config;
use indicatif::{HumanBytes, HumanDuration};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::warn;

/// Outcome of a completed pass
#[derive(Debug)]
pub struct PassReport {
    pub stats: PassStats,
    /// Per-entry failures; none of them stopped the pass
    pub errors: Vec<SyncError>,
    pub duration: Duration,
}

impl PassReport {
    /// One-line summary for the log
    pub fn summary(&self) -> String {
        format!(
            "Pass finished in {}: {} dirs, {} copied ({} new, {} updated, {}), {} unchanged, {} created dirs, {} ignored, {} failed",
            HumanDuration(self.duration),
            self.stats.dirs_visited,
            self.stats.files_copied(),
            self.stats.files_created,
            self.stats.files_updated,
            HumanBytes(self.stats.bytes_copied),
            self.stats.files_skipped,
            self.stats.dirs_created,
            self.stats.entries_ignored,
            self.stats.failures,
        )
    }

    /// Failures grouped by kind, or `None` for a clean pass
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(format_error_summary(&self.errors))
    }
}

/// Run one pass: walk `config.source` and mirror it into `config.destination`
///
/// Fails only when the pass cannot start at all: the destination root cannot
/// be created or the source root cannot be listed. Everything below the root
/// fails per entry and is reported in the returned [`PassReport`].
pub fn run(config: &Config) -> Result<PassReport, SyncError> {
    let started = Instant::now();

    fs::create_dir_all(&config.destination).map_err(|source| SyncError::DirectoryCreation {
        path: config.destination.clone(),
        source,
    })?;

    let dest_root = fs::canonicalize(&config.destination).map_err(|source| {
        SyncError::FilesystemAccess {
            path: config.destination.clone(),
            source,
        }
    })?;

    let mut walker = walk_tree(&config.source)?;
    let mut copier = SelectiveCopier::new();

    while let Some(item) = walker.next() {
        let listing = match item {
            Ok(listing) => listing,
            Err(error) => {
                copier.record_error(error);
                continue;
            }
        };

        let excluded = destination_inside(&listing, &dest_root);
        if let Some(path) = &excluded {
            warn!("Not mirroring {}: it is the destination", path.display());
            walker.prune(path);
        }

        let names = listing
            .names()
            .filter(|name| excluded.as_deref().and_then(Path::file_name) != Some(*name));
        let dest_dir = config.destination.join(&listing.relative);
        let blocked = copier.mirror_entries(&listing.path, &dest_dir, names);
        for path in blocked {
            walker.prune(&path);
        }
    }

    let (stats, errors) = copier.finish();
    Ok(PassReport {
        stats,
        errors,
        duration: started.elapsed(),
    })
}

/// The child of `listing` that is the destination root, if any
///
/// Only a subdirectory named like the destination root is canonicalized, so
/// the check costs nothing for ordinary directories.
fn destination_inside(listing: &DirListing, dest_root: &Path) -> Option<PathBuf> {
    let dest_name: &OsStr = dest_root.file_name()?;
    let entry = listing
        .subdirs()
        .find(|entry| entry.name.as_os_str() == dest_name)?;
    let candidate = listing.path.join(&entry.name);
    match fs::canonicalize(&candidate) {
        Ok(resolved) if resolved == dest_root => Some(candidate),
        _ => None,
    }
}

fn format_error_summary(errors: &[SyncError]) -> String {
    let mut groups: BTreeMap<&'static str, Vec<&SyncError>> = BTreeMap::new();
    for error in errors {
        groups.entry(error.kind_label()).or_default().push(error);
    }

    let mut lines = Vec::new();
    lines.push("Error summary:".to_string());
    for (kind, items) in groups {
        lines.push(format!("  {} ({}):", kind, items.len()));
        for error in items.iter().take(3) {
            match error.path() {
                Some(path) => lines.push(format!("    - {}", path.display())),
                None => lines.push(format!("    - {}", error)),
            }
            if let Some(suggestion) = error.suggestion() {
                lines.push(format!("      Try: {}", suggestion));
            }
        }
        if items.len() > 3 {
            lines.push(format!("    - ... {} more", items.len() - 3));
        }
    }
    lines.join("\n")
}
