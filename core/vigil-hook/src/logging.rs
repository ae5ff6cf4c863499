//! File-based logging for the hook binary.
//!
//! Hooks share stdout and stderr with the session console, so
//! diagnostics go to daily-rolled files under the status directory
//! instead. Logging is best effort: when the home or log directory
//! cannot be resolved the hook simply runs unlogged.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use vigil_core::storage::StorageConfig;

/// Environment variable that overrides the default `info` filter.
const LOG_ENV: &str = "VIGIL_LOG";

/// Initialize logging. The returned guard must live as long as the
/// process; dropping it flushes buffered output.
pub fn init() -> Option<WorkerGuard> {
    let config = StorageConfig::locate().ok()?;
    let log_dir = config.log_dir();
    fs_err::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(&log_dir, "vigil-hook.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}
