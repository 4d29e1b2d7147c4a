//! Configuration management

use super::types::SyncError;
use clap::Parser;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "sync.log";

/// Command-line interface
#[derive(Debug, Parser)]
#[command(name = "mirrorloop", version, about = "Periodically mirror changed files from one directory tree to another")]
pub struct Cli {
    /// Path to source directory
    pub source: PathBuf,

    /// Path to destination directory
    pub destination: PathBuf,

    /// Time in minutes between syncs
    #[arg(
        short = 'l',
        long = "loop_time",
        value_name = "MINUTES",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub loop_time: u64,
}

/// Global configuration for mirrorloop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    /// Length of one sync cycle
    pub interval: Duration,

    /// File the log sink appends to (in addition to the console)
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            interval: Duration::from_secs(60),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let interval = cli
            .loop_time
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| SyncError::Config(format!("Loop time too large: {}", cli.loop_time)))?;

        let config = Config {
            source: cli.source,
            destination: cli.destination,
            interval,
            ..Config::default()
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Interval expressed in whole minutes, for log lines
    pub fn interval_minutes(&self) -> u64 {
        self.interval.as_secs() / 60
    }

    /// Validate configuration
    ///
    /// The source is not required to exist here: a missing source only
    /// fails the cycle it is noticed in.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.interval.is_zero() {
            return Err(SyncError::Config(
                "Loop time must be greater than zero".to_string(),
            ));
        }

        let source = resolve_path(&self.source);
        let destination = resolve_path(&self.destination);

        if source == destination {
            return Err(SyncError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        if destination.starts_with(&source) {
            return Err(SyncError::Config(format!(
                "Destination {:?} lies inside source {:?}",
                self.destination, self.source
            )));
        }

        Ok(())
    }
}

/// Absolute, symlink-free spelling of `path`, which need not exist yet
///
/// The deepest existing ancestor is canonicalized and the missing tail is
/// appended with `.` and `..` resolved lexically. Two spellings of the same
/// location resolve to the same path.
pub fn resolve_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    for ancestor in absolute.ancestors() {
        let Ok(mut resolved) = ancestor.canonicalize() else {
            continue;
        };
        if let Ok(tail) = absolute.strip_prefix(ancestor) {
            push_lexically(&mut resolved, tail);
        }
        return resolved;
    }

    let mut resolved = PathBuf::new();
    push_lexically(&mut resolved, &absolute);
    resolved
}

fn push_lexically(base: &mut PathBuf, tail: &Path) {
    for component in tail.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                base.pop();
            }
            other => base.push(other),
        }
    }
}
