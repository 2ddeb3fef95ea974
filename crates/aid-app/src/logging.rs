// Rust guideline compliant 2026-10-16

//! Log subscriber setup.

use crate::error::{AppError, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// Logging options.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Logging level.
    pub log_level: String,
    /// Optional log file path.
    pub log_file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Installs a JSON subscriber writing to stderr or, if set, to the log file.
///
/// A subscriber that is already installed is left in place.
///
/// # Returns
///
/// The appender guard for file logging. Keep it alive until exit so
/// buffered lines are flushed.
///
/// # Errors
///
/// Returns an error if the level is unknown or the log file cannot be opened.
pub fn init_tracing(options: &LogOptions) -> Result<Option<WorkerGuard>> {
    let level = parse_log_level(&options.log_level)?;

    if let Some(path) = &options.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(aid_core::Error::from)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = fmt()
            .with_max_level(level)
            .with_target(false)
            .json()
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(Some(guard));
    }

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .json()
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(None)
}

/// Parses a log level name.
///
/// # Errors
///
/// Returns an error for names other than error, warn, info, debug or trace.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => Err(AppError::InvalidInput(format!("Invalid log level: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_init_tracing_to_file_returns_guard() {
        let temp_dir = TempDir::new().unwrap();
        let options = LogOptions {
            log_level: "debug".to_string(),
            log_file: Some(temp_dir.path().join("aid.log")),
        };
        let guard = init_tracing(&options).unwrap();
        assert!(guard.is_some());
        assert!(temp_dir.path().join("aid.log").exists());
    }

    #[test]
    fn test_init_tracing_rejects_unknown_level() {
        let options = LogOptions {
            log_level: "chatty".to_string(),
            log_file: None,
        };
        assert!(init_tracing(&options).is_err());
    }
}
