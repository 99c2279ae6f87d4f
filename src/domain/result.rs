//! Result type alias for Shipex
//!
//! This module provides a convenient Result type alias that uses ShipexError
//! as the error type.

use super::errors::ShipexError;

/// Result type alias for Shipex operations
///
/// # Examples
///
/// ```
/// use shipex::domain::result::Result;
/// use shipex::domain::errors::ShipexError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ShipexError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ShipexError>;
