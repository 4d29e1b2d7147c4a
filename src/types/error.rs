//! Error types for mirrorloop

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for mirror operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source or destination path could not be read
    #[error("Cannot access {path}: {source}")]
    FilesystemAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination directory could not be created
    #[error("Cannot create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copy of a single file failed
    #[error("Failed to copy {src} to {dest}: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Log sink could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl SyncError {
    /// Underlying IO error, if any
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            SyncError::FilesystemAccess { source, .. }
            | SyncError::DirectoryCreation { source, .. }
            | SyncError::Copy { source, .. } => Some(source),
            SyncError::Config(_) | SyncError::Logging(_) => None,
        }
    }

    /// Check if this error is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, SyncError::Config(_))
    }

    /// The path the error is about, when there is one
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            SyncError::FilesystemAccess { path, .. } | SyncError::DirectoryCreation { path, .. } => {
                Some(path)
            }
            SyncError::Copy { src, .. } => Some(src),
            SyncError::Config(_) | SyncError::Logging(_) => None,
        }
    }

    /// Short label used to group errors in pass summaries
    pub fn kind_label(&self) -> &'static str {
        match self {
            SyncError::Config(_) => "Configuration error",
            SyncError::FilesystemAccess { .. } => "Access error",
            SyncError::DirectoryCreation { .. } => "Directory creation error",
            SyncError::Copy { .. } => "Copy error",
            SyncError::Logging(_) => "Logging error",
        }
    }

    /// Plain-English hint for the user, based on the underlying IO error
    pub fn suggestion(&self) -> Option<&'static str> {
        let io = self.io_error()?;
        let hint = match io.kind() {
            ErrorKind::NotFound => "Verify the path still exists; it will be retried next cycle.",
            ErrorKind::PermissionDenied => {
                "Check file permissions or run with a user that has access."
            }
            ErrorKind::AlreadyExists => {
                "Remove or rename the conflicting destination path."
            }
            ErrorKind::WriteZero | ErrorKind::UnexpectedEof => {
                "The transfer was cut short; check disk space and stability."
            }
            _ => "It will be retried next cycle. If this keeps happening, check disk health.",
        };
        Some(hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Error as IoError;

    #[test]
    fn test_config_error() {
        let error = SyncError::Config("Invalid source path".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Invalid source path"));
        assert!(error.is_config_error());
        assert!(error.suggestion().is_none());
        assert!(error.path().is_none());
    }

    #[test]
    fn test_filesystem_access_display_and_path() {
        let error = SyncError::FilesystemAccess {
            path: PathBuf::from("/mnt/source"),
            source: IoError::new(ErrorKind::NotFound, "gone"),
        };
        assert!(error.to_string().contains("/mnt/source"));
        assert_eq!(error.path(), Some(&PathBuf::from("/mnt/source")));
        assert_eq!(error.kind_label(), "Access error");
        assert!(error
            .suggestion()
            .is_some_and(|s| s.contains("retried next cycle")));
    }

    #[test]
    fn test_copy_error_reports_both_paths() {
        let error = SyncError::Copy {
            src: PathBuf::from("src/a.txt"),
            dest: PathBuf::from("dst/a.txt"),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };
        let text = error.to_string();
        assert!(text.contains("src/a.txt"));
        assert!(text.contains("dst/a.txt"));
        assert_eq!(error.path(), Some(&PathBuf::from("src/a.txt")));
        assert!(error
            .suggestion()
            .is_some_and(|s| s.contains("file permissions")));
    }

    #[test]
    fn test_io_error_accessor() {
        let error = SyncError::DirectoryCreation {
            path: PathBuf::from("dst/sub"),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            error.io_error().map(|e| e.kind()),
            Some(ErrorKind::PermissionDenied)
        );
        assert!(SyncError::Config("error".to_string()).io_error().is_none());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let error = SyncError::DirectoryCreation {
            path: PathBuf::from("dst/sub"),
            source: IoError::new(ErrorKind::AlreadyExists, "exists"),
        };
        assert!(error.source().is_some());
        assert!(SyncError::Logging("x".to_string()).source().is_none());
    }
}
