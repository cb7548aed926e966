//! # Logging Setup
//!
//! Installs the global `tracing` subscriber.
//!
//! `RUST_LOG` directives are honored; the configured level is added as the
//! default directive. With `log_dir` set, output goes to a daily rolling file
//! through a non-blocking writer instead of stdout.

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// File name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "road-risk-live.log";

/// Install the global subscriber
///
/// The returned guard must be kept alive for as long as logs should be
/// flushed to the file; it is `None` when logging to stdout.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(default_level(config).into());

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

/// Configured level, or INFO if it does not parse
fn default_level(config: &LoggingConfig) -> Level {
    config.level.parse().unwrap_or(Level::INFO)
}
