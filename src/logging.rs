//! Logging setup
//!
//! All console output goes through one global subscriber whose stdout/stderr
//! layer writes via a [`LogRouter`], so the dashboard can take the output
//! over while it is open and hand it back when it closes.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::bridge::LogRouter;
use crate::config::LoggingConfig;
use crate::error::{LoupError, Result};

/// Keeps the file writer alive; flushes pending lines on drop
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
    file_dir: Option<String>,
}

impl LoggingGuard {
    /// Directory of the daily log file, if file logging is on
    pub fn file_dir(&self) -> Option<&str> {
        self.file_dir.as_deref()
    }
}

/// Build the env filter: `RUST_LOG` wins over the configured level
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{level},loup={level}")))
}

/// Install the global subscriber writing through `router`
pub fn init_logging(config: &LoggingConfig, router: LogRouter) -> Result<LoggingGuard> {
    let filter = build_filter(&config.level);

    let (file_layer, file_guard, file_dir) = match config.file_dir.as_deref() {
        Some(dir) => match prepare_log_dir(Path::new(dir)) {
            Ok(()) => {
                // Daily rotating file appender
                let file_appender = tracing_appender::rolling::daily(dir, "loup.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false) // No color codes in file
                    .with_target(true);
                (Some(layer), Some(guard), Some(dir.to_string()))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not write to log directory {} ({}), file logging disabled",
                    dir, e
                );
                (None, None, None)
            }
        },
        None => (None, None, None),
    };

    // Console layers; the dashboard renders plain text so ANSI stays off
    let (plain_layer, json_layer) = if config.json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(router)
            .with_ansi(false);
        (None, Some(layer))
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(router)
            .with_ansi(false)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoupError::Internal(format!("failed to install logger: {e}")))?;

    Ok(LoggingGuard {
        _file: file_guard,
        file_dir,
    })
}

/// Minimal stderr logging for one-shot CLI commands
pub fn init_logging_simple() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

/// `tracing_appender::rolling::daily` panics if it cannot create the initial
/// file, so writability is checked up front.
fn prepare_log_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let test_path = dir.join(".loup_write_test");
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&test_path)?;
    let _ = std::fs::remove_file(&test_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_log_dir_creates_directory() {
        let dir = std::env::temp_dir().join(format!("loup-log-test-{}", uuid::Uuid::new_v4()));
        prepare_log_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(!dir.join(".loup_write_test").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_build_filter_accepts_configured_level() {
        let filter = build_filter("debug");
        assert!(!filter.to_string().is_empty());
    }
}
