//! Static carrier → zone → countries reference data
//!
//! The JSON document is an object keyed by lowercase carrier name, each
//! holding an object of zone label → array of country codes:
//!
//! ```json
//! { "fedex": { "A": ["CA", "MX"], "B": ["DE", "FR"] } }
//! ```
//!
//! Zone order in the file is kept; the first zone listing a country wins.

use crate::domain::{Result, ShipexError};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Loaded zone reference table, read-only for a run
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    carriers: HashMap<String, Vec<(String, HashSet<String>)>>,
}

impl ZoneTable {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ShipexError::ZoneTable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let table = Self::from_json_str(&contents)?;

        tracing::info!(
            path = %path.display(),
            carriers = table.carrier_count(),
            "Zone table loaded"
        );
        Ok(table)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)
            .map_err(|e| ShipexError::ZoneTable(format!("Invalid zone JSON: {e}")))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| ShipexError::ZoneTable("Root must be an object".to_string()))?;

        let mut carriers = HashMap::with_capacity(root.len());
        for (carrier, zones) in root {
            let zones = zones.as_object().ok_or_else(|| {
                ShipexError::ZoneTable(format!("Carrier '{carrier}' must map to an object"))
            })?;

            let mut entries = Vec::with_capacity(zones.len());
            for (zone, countries) in zones {
                let countries = countries.as_array().ok_or_else(|| {
                    ShipexError::ZoneTable(format!(
                        "Zone '{zone}' of '{carrier}' must be an array of country codes"
                    ))
                })?;
                let set = countries
                    .iter()
                    .map(|c| {
                        c.as_str().map(|s| s.trim().to_string()).ok_or_else(|| {
                            ShipexError::ZoneTable(format!(
                                "Non-string country code in zone '{zone}' of '{carrier}'"
                            ))
                        })
                    })
                    .collect::<Result<HashSet<_>>>()?;
                entries.push((zone.clone(), set));
            }

            carriers.insert(carrier.trim().to_lowercase(), entries);
        }

        Ok(Self { carriers })
    }

    /// First zone of `carrier` (case-insensitive) whose countries include `country`
    pub fn lookup(&self, country: &str, carrier: &str) -> Option<&str> {
        let zones = self.carriers.get(&carrier.trim().to_lowercase())?;
        let country = country.trim();
        zones
            .iter()
            .find(|(_, countries)| countries.contains(country))
            .map(|(zone, _)| zone.as_str())
    }

    pub fn carrier_count(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ZONES: &str = r#"{
        "fedex": {"B": ["CA"], "A": ["CA", "MX"], "C": ["DE"]},
        "UPS": {"1": ["GB"]}
    }"#;

    #[test]
    fn test_first_listed_zone_wins() {
        let table = ZoneTable::from_json_str(ZONES).unwrap();
        assert_eq!(table.lookup("CA", "fedex"), Some("B"));
        assert_eq!(table.lookup("MX", "fedex"), Some("A"));
    }

    #[test]
    fn test_carrier_case_insensitive() {
        let table = ZoneTable::from_json_str(ZONES).unwrap();
        assert_eq!(table.lookup("DE", "FedEx"), Some("C"));
        assert_eq!(table.lookup("GB", " UPS "), Some("1"));
    }

    #[test]
    fn test_unresolved() {
        let table = ZoneTable::from_json_str(ZONES).unwrap();
        assert_eq!(table.lookup("JP", "fedex"), None);
        assert_eq!(table.lookup("CA", "dhl"), None);
    }

    #[test]
    fn test_malformed_documents_rejected() {
        assert!(ZoneTable::from_json_str("[]").is_err());
        assert!(ZoneTable::from_json_str(r#"{"fedex": ["CA"]}"#).is_err());
        assert!(ZoneTable::from_json_str(r#"{"fedex": {"A": "CA"}}"#).is_err());
        assert!(ZoneTable::from_json_str(r#"{"fedex": {"A": [1]}}"#).is_err());
        assert!(matches!(
            ZoneTable::from_json_str("{"),
            Err(ShipexError::ZoneTable(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ZONES.as_bytes()).unwrap();

        let table = ZoneTable::load(file.path()).unwrap();
        assert_eq!(table.carrier_count(), 2);
        assert!(ZoneTable::load("/nonexistent/zones.json").is_err());
    }
}
