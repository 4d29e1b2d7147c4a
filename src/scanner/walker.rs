//! Top-down directory walker
//!
//! Yields one [`DirListing`] per directory, parent before children. The
//! traversal keeps an explicit stack of pending directories instead of
//! recursing, so very deep trees cannot exhaust the call stack.

use crate::types::{DirEntry, DirListing, EntryKind, SyncError};
use std::fs;
use std::path::{Path, PathBuf};

/// A directory queued for listing
#[derive(Debug)]
struct Pending {
    path: PathBuf,
    relative: PathBuf,
}

/// Lazy walk over a source tree
///
/// Each item is either a directory listing or the error that prevented a
/// subdirectory from being listed. After an error the walk carries on with
/// the remaining directories; the unreadable subtree is skipped.
#[derive(Debug)]
pub struct TreeWalker {
    root: Option<DirListing>,
    stack: Vec<Pending>,
}

/// Start a walk at `root`
///
/// The root is listed immediately, so an unreadable or missing root is
/// reported here rather than as the first item.
pub fn walk_tree(root: &Path) -> Result<TreeWalker, SyncError> {
    let entries = read_entries(root)?;
    Ok(TreeWalker {
        root: Some(DirListing {
            path: root.to_path_buf(),
            relative: PathBuf::new(),
            entries,
        }),
        stack: Vec::new(),
    })
}

/// List the immediate children of `dir`, sorted by name
///
/// Kinds come from the directory entry itself, so symlinks show up as
/// [`EntryKind::Other`] and are never followed.
pub fn read_entries(dir: &Path) -> Result<Vec<DirEntry>, SyncError> {
    let access_error = |source| SyncError::FilesystemAccess {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for item in fs::read_dir(dir).map_err(access_error)? {
        let item = item.map_err(access_error)?;
        let kind = match item.file_type() {
            Ok(file_type) => EntryKind::from_file_type(file_type),
            Err(e) => {
                tracing::debug!("Cannot determine type of {}: {}", item.path().display(), e);
                EntryKind::Other
            }
        };
        entries.push(DirEntry::new(item.file_name(), kind));
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

impl TreeWalker {
    /// Drop a subdirectory that has not been yielded yet, with everything
    /// below it. Returns true if something was removed.
    ///
    /// Only directories already queued can be pruned: call this after the
    /// listing of the parent has been yielded.
    pub fn prune(&mut self, path: &Path) -> bool {
        let before = self.stack.len();
        self.stack.retain(|pending| pending.path != path);
        self.stack.len() != before
    }

    fn queue_children(&mut self, listing: &DirListing) {
        // Reverse so the first name is popped first.
        for entry in listing.subdirs().collect::<Vec<_>>().into_iter().rev() {
            self.stack.push(Pending {
                path: listing.path.join(&entry.name),
                relative: listing.relative.join(&entry.name),
            });
        }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<DirListing, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.queue_children(&root);
            return Some(Ok(root));
        }

        let pending = self.stack.pop()?;
        match read_entries(&pending.path) {
            Ok(entries) => {
                let listing = DirListing {
                    path: pending.path,
                    relative: pending.relative,
                    entries,
                };
                self.queue_children(&listing);
                Some(Ok(listing))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn relatives(walker: TreeWalker) -> Vec<PathBuf> {
        walker
            .map(|item| item.expect("listing should succeed").relative)
            .collect()
    }

    #[test]
    fn test_walk_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let mut walker = walk_tree(temp_dir.path()).expect("walk should start");
        let root = walker.next().expect("root listing").expect("root ok");

        assert_eq!(root.path, temp_dir.path());
        assert_eq!(root.relative, PathBuf::new());
        assert!(root.entries.is_empty());
        assert!(walker.next().is_none());
    }

    #[test]
    fn test_walk_missing_root_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("nope");

        let err = walk_tree(&missing).unwrap_err();
        assert!(matches!(err, SyncError::FilesystemAccess { ref path, .. } if path == &missing));
    }

    #[test]
    fn test_walk_is_top_down_and_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b/inner")).expect("Failed to create dirs");
        fs::create_dir_all(root.join("a")).expect("Failed to create dirs");
        fs::write(root.join("z.txt"), b"z").expect("Failed to write");
        fs::write(root.join("b/inner/deep.txt"), b"d").expect("Failed to write");

        let order = relatives(walk_tree(root).expect("walk should start"));
        assert_eq!(
            order,
            vec![
                PathBuf::new(),
                PathBuf::from("a"),
                PathBuf::from("b"),
                PathBuf::from("b/inner"),
            ]
        );
    }

    #[test]
    fn test_listing_contains_files_and_dirs() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).expect("Failed to create dir");
        fs::write(root.join("a.txt"), b"a").expect("Failed to write");

        let root_listing = walk_tree(root)
            .expect("walk should start")
            .next()
            .expect("root listing")
            .expect("root ok");

        assert_eq!(
            root_listing.entries,
            vec![
                DirEntry::new("a.txt", EntryKind::File),
                DirEntry::new("sub", EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn test_prune_skips_subtree() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("skip/me")).expect("Failed to create dirs");
        fs::create_dir_all(root.join("keep")).expect("Failed to create dirs");

        let mut walker = walk_tree(root).expect("walk should start");
        let _root_listing = walker.next().expect("root listing").expect("root ok");

        assert!(walker.prune(&root.join("skip")));
        assert!(!walker.prune(&root.join("skip")));

        assert_eq!(relatives(walker), vec![PathBuf::from("keep")]);
    }

    #[test]
    fn test_deep_tree_does_not_recurse() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut deep = temp_dir.path().to_path_buf();
        for i in 0..200 {
            deep.push(format!("d{i}"));
        }
        fs::create_dir_all(&deep).expect("Failed to create deep tree");

        let count = walk_tree(temp_dir.path())
            .expect("walk should start")
            .filter(|item| item.is_ok())
            .count();
        assert_eq!(count, 201);
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_directory_is_not_followed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir(root.join("real")).expect("Failed to create dir");
        std::os::unix::fs::symlink(root.join("real"), root.join("link"))
            .expect("Failed to create symlink");

        let mut walker = walk_tree(root).expect("walk should start");
        let root_listing = walker.next().expect("root listing").expect("root ok");
        let link = root_listing
            .entries
            .iter()
            .find(|e| e.name == OsString::from("link"))
            .expect("link listed");
        assert_eq!(link.kind, EntryKind::Other);

        assert_eq!(relatives(walker), vec![PathBuf::from("real")]);
    }

    #[test]
    fn test_vanished_subdirectory_yields_error_and_continues() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir(root.join("a")).expect("Failed to create dir");
        fs::create_dir(root.join("b")).expect("Failed to create dir");

        let mut walker = walk_tree(root).expect("walk should start");
        let _root_listing = walker.next().expect("root listing").expect("root ok");
        fs::remove_dir(root.join("a")).expect("Failed to remove dir");

        let first = walker.next().expect("item for a");
        assert!(matches!(first, Err(SyncError::FilesystemAccess { .. })));
        let second = walker.next().expect("item for b").expect("b ok");
        assert_eq!(second.relative, PathBuf::from("b"));
        assert!(walker.next().is_none());
    }
}
