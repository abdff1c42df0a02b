//! Tracing subscriber setup for the simulator.
//!
//! The library only emits `tracing` events. The binary installs a file-backed
//! subscriber so stdout carries nothing but step reports; follow the log with
//! `tail -f`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Logging setup failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path has no usable file name (e.g. ends in `..`).
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// A global subscriber is already installed.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log path into the directory to create and the file name to append to.
///
/// A bare file name logs into the working directory.
fn log_target(log_path: &Path) -> Result<(PathBuf, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = log_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((directory, file_name))
}

/// Install the global subscriber, appending to `log_path`.
///
/// `RUST_LOG` wins over `default_level` when set and valid. The log directory
/// is created on demand.
///
/// # Errors
///
/// [`LoggingError`] when the path is unusable, the directory cannot be created,
/// or a subscriber is already installed.
pub fn init(log_path: &Path, default_level: &str) -> Result<(), LoggingError> {
    let (directory, file_name) = log_target(log_path)?;
    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let writer = tracing_appender::rolling::never(&directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn log_target_splits_directory_and_file() {
        let (directory, file) = log_target(Path::new("/var/log/carousel/sim.log")).unwrap();
        assert_eq!(directory, PathBuf::from("/var/log/carousel"));
        assert_eq!(file, "sim.log");
    }

    #[test]
    fn bare_file_name_logs_to_working_directory() {
        let (directory, file) = log_target(Path::new("sim.log")).unwrap();
        assert_eq!(directory, PathBuf::from("."));
        assert_eq!(file, "sim.log");
    }

    #[test]
    fn path_without_file_name_is_invalid() {
        let err = log_target(Path::new("/weird/..")).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidPath(_)));
        assert!(err.to_string().contains("/weird/.."));
    }

    #[test]
    #[serial(tracing_init)]
    fn init_creates_missing_directory() {
        let dir = std::env::temp_dir().join("carousel_test_logs_create");
        let _ = fs::remove_dir_all(&dir);

        // A subscriber installed by an earlier test makes this Err; the
        // directory is created either way.
        let _ = init(&dir.join("sim.log"), "info");

        assert!(dir.exists(), "log directory should be created: {:?}", dir);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let dir = std::env::temp_dir().join("carousel_test_logs_twice");
        let log_file = dir.join("twice.log");

        let _ = init(&log_file, "info");
        let second = init(&log_file, "debug");

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
        let _ = fs::remove_dir_all(&dir);
    }
}
