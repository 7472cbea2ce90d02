//! Structured logging with JSON or pretty output.
//!
//! Logs go to stderr so that machine-readable command output on stdout stays clean.

use crate::{LogFormat, TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging subsystem.
///
/// Sets up tracing-subscriber with either JSON or pretty format,
/// respecting the configured log level.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    // Build the env filter from config or RUST_LOG
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => init_json_logging(filter),
        LogFormat::Pretty => init_pretty_logging(filter),
    }
}

/// Initialize JSON logging for CI log collectors.
fn init_json_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let json_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_file(false)
        .with_line_number(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Initialize pretty logging for terminals.
fn init_pretty_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let pretty_layer = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Standard log event names.
pub mod events {
    /// A lock-directory check run is starting.
    pub const CHECK_STARTED: &str = "check_started";

    /// The check was disabled by configuration or the source dir is missing.
    pub const CHECK_SKIPPED: &str = "check_skipped";

    /// A spec had no lock file yet; its lock was created.
    pub const GROUP_INITIALIZED: &str = "group_initialized";

    /// A spec is compatible with its lock; the lock was updated.
    pub const GROUP_PASSED: &str = "group_passed";

    /// A spec failed the check.
    pub const GROUP_FAILED: &str = "group_failed";

    /// A single backwards incompatible change.
    pub const VIOLATION: &str = "violation";
}

/// Helper macros for structured logging with standard fields.
///
/// These wrap the tracing macros to ensure consistent field naming.
#[macro_export]
macro_rules! log_check_started {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::CHECK_STARTED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_check_skipped {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::CHECK_SKIPPED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_group_initialized {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::GROUP_INITIALIZED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_group_passed {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::GROUP_PASSED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_group_failed {
    ($($field:tt)*) => {
        tracing::error!(
            event = $crate::logging::events::GROUP_FAILED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_violation {
    ($($field:tt)*) => {
        tracing::error!(
            event = $crate::logging::events::VIOLATION,
            $($field)*
        )
    };
}
