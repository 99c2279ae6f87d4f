//! Update-zones command implementation
//!
//! Re-reads a CSV with `COUNTRY`, `CARRIER` and `ZONE` columns and rewrites
//! the zone of every international row from the zone table.

use crate::config::load_config;
use crate::core::export::{write_processed, WrittenFile};
use crate::core::table::{read_table, TableEncoding};
use crate::core::zones::{ZoneClassifier, ZoneColumns, ZoneTable};
use crate::domain::Result;
use clap::Args;
use std::path::Path;

/// Rows with this country keep their zone
pub const DOMESTIC_COUNTRY: &str = "US";

/// Arguments for the update-zones command
#[derive(Args, Debug)]
pub struct UpdateZonesArgs {
    /// CSV to reclassify
    #[arg(short, long)]
    pub input: String,

    /// Where to write the reclassified CSV
    #[arg(long, default_value = "out.csv")]
    pub out: String,

    /// Zone table JSON, defaults to post_processing.zone_table_path
    #[arg(long)]
    pub zone_table: Option<String>,
}

impl UpdateZonesArgs {
    /// Execute the update-zones command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, out = %self.out, "Starting update-zones command");

        let zone_table_path = match &self.zone_table {
            Some(path) => path.clone(),
            None => match load_config(config_path) {
                Ok(config) => match config.post_processing.zone_table_path {
                    Some(path) => path,
                    None => {
                        eprintln!("No zone table given");
                        eprintln!("Pass --zone-table or set post_processing.zone_table_path");
                        return Ok(2);
                    }
                },
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load configuration");
                    eprintln!("Failed to load configuration: {e}");
                    eprintln!("Pass --zone-table or fix {config_path}");
                    return Ok(2);
                }
            },
        };

        let zones = match ZoneTable::load(&zone_table_path) {
            Ok(z) => z,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load zone table");
                eprintln!("Failed to load zone table: {e}");
                return Ok(2);
            }
        };

        match update_zones(&self.input, &self.out, zones) {
            Ok(file) => {
                println!("✅ Zones updated");
                println!("  Output: {} ({} rows)", file.path.display(), file.rows);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Zone update failed");
                eprintln!("Zone update failed: {e}");
                Ok(5)
            }
        }
    }
}

/// Reclassify every non-domestic row of `input` and write the result to `output`
///
/// Column order is kept; unresolved rows get an empty zone.
pub fn update_zones(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    zones: ZoneTable,
) -> Result<WrittenFile> {
    let table = read_table(input, TableEncoding::Utf8)?;
    let columns = ZoneColumns::new("CARRIER", "COUNTRY", "ZONE");
    let updated = ZoneClassifier::new(zones).reclassify_zones(&table, &columns, DOMESTIC_COUNTRY)?;
    write_processed(&updated, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_update_zones_skips_domestic_rows() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(
            &input,
            "ID,COUNTRY,CARRIER,ZONE\n1,US,UPS,5\n2,CA,UPS,\n3,ZZ,UPS,7\n",
        )
        .unwrap();
        let zones = ZoneTable::from_json_str(r#"{"ups": {"4": ["CA"]}}"#).unwrap();

        let file = update_zones(&input, &output, zones).unwrap();
        assert_eq!(file.rows, 3);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "ID,COUNTRY,CARRIER,ZONE\n1,US,UPS,5\n2,CA,UPS,4\n3,ZZ,UPS,\n");
    }

    #[test]
    fn test_update_zones_requires_columns() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "ID,COUNTRY\n1,CA\n").unwrap();

        let result = update_zones(&input, dir.path().join("out.csv"), ZoneTable::default());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_malformed_config_exits_2() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("shipex.toml");
        std::fs::write(&config, "[post_processing\nzone_table_path = ").unwrap();
        let out = dir.path().join("out.csv");
        let args = UpdateZonesArgs {
            input: dir.path().join("in.csv").to_string_lossy().into_owned(),
            out: out.to_string_lossy().into_owned(),
            zone_table: None,
        };

        let code = args.execute(&config.to_string_lossy()).await.unwrap();
        assert_eq!(code, 2);
        assert!(!out.exists());
    }
}
