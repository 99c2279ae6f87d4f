//! Domain identifier types
//!
//! Newtype wrappers for ShipStation's numeric identifiers so shipment and
//! order ids cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shipment identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use shipex::domain::ids::ShipmentId;
/// use std::str::FromStr;
///
/// let id = ShipmentId::from_str("220275386").unwrap();
/// assert_eq!(id.value(), 220275386);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentId(i64);

impl ShipmentId {
    /// Creates a new ShipmentId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShipmentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid shipment ID '{s}': {e}"))
    }
}

impl From<i64> for ShipmentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Order identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use shipex::domain::ids::OrderId;
///
/// let id = OrderId::new(100);
/// assert_eq!(id.to_string(), "100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates a new OrderId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid order ID '{s}': {e}"))
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
