//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output
//! - JSON-formatted local log files with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use shipex::logging::init_logging;
//! use shipex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use shipex::log_retry_attempt;
///
/// log_retry_attempt!(2, 5, "Shipment search returned no rows");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}

/// Log a shipment excluded from the export
///
/// # Example
///
/// ```no_run
/// use shipex::log_record_skipped;
///
/// log_record_skipped!(220275386, 100, "voided");
/// ```
#[macro_export]
macro_rules! log_record_skipped {
    ($shipment_id:expr, $order_id:expr, $reason:expr) => {
        tracing::warn!(
            shipment_id = %$shipment_id,
            order_id = %$order_id,
            reason = $reason,
            "Skipping shipment"
        );
    };
}
