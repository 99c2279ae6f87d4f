//! Carrier name normalization

use crate::core::table::Table;
use crate::domain::Result;

/// Carrier names rewritten unconditionally
const CARRIER_ALIASES: &[(&str, &str)] = &[("Stamps.com", "USPS")];

/// Normalize the carrier column
///
/// An empty carrier whose service mentions "ups" (any case) becomes "UPS";
/// aliased carrier names are rewritten. Must run before zone classification,
/// which is keyed by carrier.
pub fn normalize_carriers(table: &Table, carrier_column: &str, service_column: &str) -> Result<Table> {
    let carrier_idx = table.require_column(carrier_column)?;
    let service_idx = table.require_column(service_column)?;

    let mut changed = 0usize;
    let out = table.map_rows(|row| {
        if let Some(carrier) = normalized_carrier(&row[carrier_idx], &row[service_idx]) {
            row[carrier_idx] = carrier;
            changed += 1;
        }
    });

    tracing::debug!(rows = out.len(), changed = changed, "Carriers normalized");
    Ok(out)
}

/// Replacement carrier name, `None` if unchanged
fn normalized_carrier(carrier: &str, service: &str) -> Option<String> {
    if carrier.trim().is_empty() {
        return service
            .to_lowercase()
            .contains("ups")
            .then(|| "UPS".to_string());
    }

    CARRIER_ALIASES
        .iter()
        .find(|(from, _)| *from == carrier)
        .map(|(_, to)| to.to_string())
}
