//! Domain error types
//!
//! This module defines the error hierarchy for Shipex.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Shipex error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ShipexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// ShipStation API errors
    #[error("ShipStation error: {0}")]
    ShipStation(#[from] ShipStationError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Tabular data errors (missing columns, ragged rows)
    #[error("Table error: {0}")]
    Table(String),

    /// Zone reference data errors
    #[error("Zone table error: {0}")]
    ZoneTable(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// ShipStation-specific errors
///
/// Errors that occur when talking to the ShipStation REST API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ShipStationError {
    /// Failed to connect to the API
    #[error("Failed to connect to ShipStation: {0}")]
    ConnectionFailed(String),

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Requested resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded, resets in: {0}")]
    RateLimited(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl ShipStationError {
    /// Whether a later attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ShipStationError::ConnectionFailed(_)
                | ShipStationError::RateLimited(_)
                | ShipStationError::ServerError { .. }
                | ShipStationError::Timeout(_)
                | ShipStationError::NotFound(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ShipexError {
    fn from(err: std::io::Error) -> Self {
        ShipexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ShipexError {
    fn from(err: serde_json::Error) -> Self {
        ShipexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ShipexError {
    fn from(err: toml::de::Error) -> Self {
        ShipexError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for ShipexError {
    fn from(err: csv::Error) -> Self {
        ShipexError::Table(format!("CSV error: {err}"))
    }
}
