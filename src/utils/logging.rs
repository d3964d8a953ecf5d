//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the OnChain bot.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer when dropped, so the caller
/// must keep it alive for as long as the process runs.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "onchain-bot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(address: &str, action: &str, details: Option<&str>) {
    info!(
        address = address,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log provider errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log the outcome of one background scan cycle
pub fn log_scan_result(task: &str, examined: usize, delivered: usize, skipped: usize) {
    if skipped > 0 {
        warn!(
            task = task,
            examined = examined,
            delivered = delivered,
            skipped = skipped,
            "Scan cycle finished with skipped entries"
        );
    } else {
        info!(
            task = task,
            examined = examined,
            delivered = delivered,
            "Scan cycle finished"
        );
    }
}

/// Log store operations
pub fn log_store_operation(operation: &str, key: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            key = key,
            duration_ms = duration_ms,
            "Store operation completed"
        );
    } else {
        error!(
            operation = operation,
            key = key,
            duration_ms = duration_ms,
            "Store operation failed"
        );
    }
}
