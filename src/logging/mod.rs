//! Logging and observability
//!
//! Structured logging with:
//! - Human-readable or JSON console output
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - Local JSON file logging with rotation
//!
//! Upload content never reaches the logs: scans are identified by filename,
//! media kind and a SHA-256 fingerprint of the bytes.
//!
//! # Example
//!
//! ```no_run
//! use granite_regulate::logging::init_logging;
//! use granite_regulate::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a scan
///
/// # Example
///
/// ```no_run
/// use granite_regulate::log_scan_start;
///
/// log_scan_start!("patients.csv", "csv", "9f86d081884c7d65");
/// ```
#[macro_export]
macro_rules! log_scan_start {
    ($filename:expr, $media_kind:expr, $fingerprint:expr) => {
        tracing::info!(
            filename = %$filename,
            media_kind = %$media_kind,
            fingerprint = %$fingerprint,
            "Starting compliance scan"
        );
    };
}

/// Log the completion of a scan
///
/// # Example
///
/// ```no_run
/// use granite_regulate::log_scan_complete;
/// use std::time::Duration;
///
/// log_scan_complete!("patients.csv", 3, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_scan_complete {
    ($filename:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            filename = %$filename,
            violations = $count,
            duration_ms = $duration.as_millis() as u64,
            "Compliance scan completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use granite_regulate::log_error_with_context;
/// use granite_regulate::domain::RegulateError;
///
/// let error = RegulateError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
