//! Zone classification over tables

use super::ZoneTable;
use crate::core::table::Table;
use crate::domain::Result;

/// Column names the classifier reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneColumns {
    pub carrier: String,
    pub country: String,
    pub zone: String,
}

impl ZoneColumns {
    pub fn new(
        carrier: impl Into<String>,
        country: impl Into<String>,
        zone: impl Into<String>,
    ) -> Self {
        Self {
            carrier: carrier.into(),
            country: country.into(),
            zone: zone.into(),
        }
    }
}

impl Default for ZoneColumns {
    fn default() -> Self {
        Self::new("carrier", "country", "zone")
    }
}

/// Resolves zones from a [`ZoneTable`]
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    table: ZoneTable,
}

impl ZoneClassifier {
    pub fn new(table: ZoneTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ZoneTable {
        &self.table
    }

    /// Zone for a destination country and carrier name, `None` if unresolved
    pub fn classify(&self, country: Option<&str>, carrier: Option<&str>) -> Option<String> {
        let country = country.map(str::trim).filter(|c| !c.is_empty());
        let carrier = carrier.map(str::trim).filter(|c| !c.is_empty());

        let (Some(country), Some(carrier)) = (country, carrier) else {
            tracing::warn!(
                country = ?country,
                carrier = ?carrier,
                "Cannot classify zone without country and carrier"
            );
            return None;
        };

        let zone = self.table.lookup(country, carrier);
        if zone.is_none() {
            tracing::debug!(country = %country, carrier = %carrier, "Zone unresolved");
        }
        zone.map(str::to_string)
    }

    /// Fill empty zone cells; non-empty zones are never changed
    ///
    /// The zone column is appended if the table lacks one.
    pub fn fill_zones(&self, table: &Table, columns: &ZoneColumns) -> Result<Table> {
        let carrier_idx = table.require_column(&columns.carrier)?;
        let country_idx = table.require_column(&columns.country)?;
        let (table, zone_idx) = table.with_column(&columns.zone);

        let mut filled = 0usize;
        let out = table.map_rows(|row| {
            if !row[zone_idx].trim().is_empty() {
                return;
            }
            let zone = self.classify(
                Some(row[country_idx].as_str()),
                Some(row[carrier_idx].as_str()),
            );
            if let Some(zone) = zone {
                row[zone_idx] = zone;
                filled += 1;
            }
        });

        tracing::info!(rows = out.len(), filled = filled, "Zone gaps filled");
        Ok(out)
    }

    /// Overwrite the zone of every row whose country is not `skip_country`
    ///
    /// Unresolved rows get an empty zone.
    pub fn reclassify_zones(
        &self,
        table: &Table,
        columns: &ZoneColumns,
        skip_country: &str,
    ) -> Result<Table> {
        let carrier_idx = table.require_column(&columns.carrier)?;
        let country_idx = table.require_column(&columns.country)?;
        let zone_idx = table.require_column(&columns.zone)?;

        let mut updated = 0usize;
        let out = table.map_rows(|row| {
            if row[country_idx].trim() == skip_country {
                return;
            }
            row[zone_idx] = self
                .classify(
                    Some(row[country_idx].as_str()),
                    Some(row[carrier_idx].as_str()),
                )
                .unwrap_or_default();
            updated += 1;
        });

        tracing::info!(rows = out.len(), updated = updated, "Zones reclassified");
        Ok(out)
    }
}
