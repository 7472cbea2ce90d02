//! Logging infrastructure for specguard.
//!
//! This crate provides:
//! - Structured JSON or pretty logging to stderr
//! - Standard event names and `log_*!` macros for the compatibility check
//!
//! # Usage
//!
//! ```ignore
//! use specguard_telemetry::{LogFormat, Telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::new()
//!     .with_log_level("debug")
//!     .with_log_format(LogFormat::Pretty);
//!
//! let telemetry = Telemetry::init(config)?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::events;

use thiserror::Error;

/// Telemetry errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}

/// Main telemetry handle.
pub struct Telemetry {
    config: TelemetryConfig,
}

impl Telemetry {
    /// Initialize telemetry with the given configuration.
    ///
    /// Installs the global tracing subscriber; fails if one is already set.
    pub fn init(config: TelemetryConfig) -> Result<Self, TelemetryError> {
        logging::init_logging(&config)?;
        tracing::debug!(
            log_level = %config.log_level,
            log_format = ?config.log_format,
            "logging initialized"
        );
        Ok(Self { config })
    }

    /// Get the telemetry configuration.
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}
