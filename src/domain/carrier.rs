//! Carrier and shipping service lookups
//!
//! Carriers and their services are fetched once per run and held as
//! code → display-name lookup tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A shipping provider connected to the ShipStation account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    /// Carrier code, e.g. `ups`
    pub code: String,

    /// Display name, e.g. `UPS`
    pub name: String,
}

impl Carrier {
    /// Create a carrier
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A service offered by a carrier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingService {
    /// Code of the carrier offering this service
    pub carrier_code: String,

    /// Service code, e.g. `ups_ground`
    pub code: String,

    /// Display name, e.g. `UPS® Ground`
    pub name: String,
}

impl ShippingService {
    /// Create a service
    pub fn new(
        carrier_code: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            carrier_code: carrier_code.into(),
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Read-only code → name tables for one run
///
/// Unknown codes resolve to an empty name rather than an error.
///
/// # Examples
///
/// ```
/// use shipex::domain::carrier::{Carrier, CarrierLookup};
///
/// let lookup = CarrierLookup::new(vec![Carrier::new("ups", "UPS Inc")], vec![]);
/// assert_eq!(lookup.carrier_name(Some("ups")), "UPS Inc");
/// assert_eq!(lookup.carrier_name(Some("dhl")), "");
/// assert_eq!(lookup.service_name(None), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CarrierLookup {
    carriers: HashMap<String, String>,
    services: HashMap<String, String>,
}

impl CarrierLookup {
    /// Build lookups from fetched carriers and services
    ///
    /// Services are keyed by service code alone; when two carriers expose the
    /// same service code the later one wins.
    pub fn new(carriers: Vec<Carrier>, services: Vec<ShippingService>) -> Self {
        Self {
            carriers: carriers.into_iter().map(|c| (c.code, c.name)).collect(),
            services: services.into_iter().map(|s| (s.code, s.name)).collect(),
        }
    }

    /// Display name for a carrier code, or `""`
    pub fn carrier_name(&self, code: Option<&str>) -> &str {
        code.and_then(|c| self.carriers.get(c))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Display name for a service code, or `""`
    pub fn service_name(&self, code: Option<&str>) -> &str {
        code.and_then(|c| self.services.get(c))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of carriers known
    pub fn carrier_count(&self) -> usize {
        self.carriers.len()
    }

    /// Number of services known
    pub fn service_count(&self) -> usize {
        self.services.len()
    }
}
