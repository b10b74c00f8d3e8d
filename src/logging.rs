//! Logging setup for the chartwise CLI.
//!
//! Logs go to stderr and to two daily-rotating files in the platform data
//! directory. stdout is left for JSON output.
//!
//! ```no_run
//! chartwise::logging::init().expect("Failed to initialize logging");
//! tracing::info!("Profiling started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path, creating it if needed.
///
/// Returns:
/// - Windows: `%APPDATA%/chartwise/logs`
/// - macOS: `~/Library/Application Support/chartwise/logs`
/// - Linux: `~/.local/share/chartwise/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("chartwise").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes console and file logging.
///
/// Creates two log files, both rotated daily with 10 kept:
/// - `chartwise.<date>.log`: everything the filter lets through
/// - `error.<date>.log`: warnings and errors only
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or file appenders fail.
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let all_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("chartwise")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create all-logs file appender")?;

    let error_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("error")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create error-logs file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let console_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let error_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(error_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Logging initialized, log directory: {}", log_dir.display());

    Ok(())
}
