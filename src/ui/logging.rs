//! Process-wide log sink: console and log file, both at INFO

use crate::types::SyncError;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, time::ChronoLocal};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Install the global subscriber
///
/// Every event goes to stdout and is appended to `log_file` as
/// `time LEVEL message`. File writes are unbuffered, so lines survive the
/// process being killed. Can only succeed once per process.
pub fn init_logging(log_file: &Path) -> Result<(), SyncError> {
    let file_name = log_file.file_name().ok_or_else(|| {
        SyncError::Logging(format!("Invalid log file path: {}", log_file.display()))
    })?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| {
            SyncError::Logging(format!("Cannot open log file {}: {}", log_file.display(), e))
        })?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_owned()));

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_owned()))
        .with_writer(appender);

    registry()
        .with(LevelFilter::INFO)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SyncError::Logging(e.to_string()))
}
