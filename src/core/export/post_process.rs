//! Post-processing of an exported table
//!
//! Stages, in order, each returning a new table:
//!
//! 1. Zone override join (only if configured)
//! 2. Project mapping join (only if configured)
//! 3. Re-rated cost join, coalescing onto `cost` (only if configured)
//! 4. Carrier normalization
//! 5. Zone gap fill from the zone table (only if one is loaded)

use super::summary::WrittenFile;
use super::writer::write_processed;
use crate::config::{JoinTableConfig, PostProcessingConfig};
use crate::core::table::{left_join, read_table, JoinSpec, Merge, Table, TableEncoding};
use crate::core::transform::normalize_carriers;
use crate::core::zones::{ZoneClassifier, ZoneColumns, ZoneTable};
use crate::domain::Result;
use std::path::Path;

/// Applies the configured post-processing stages
pub struct PostProcessor {
    config: PostProcessingConfig,
    classifier: Option<ZoneClassifier>,
}

impl PostProcessor {
    pub fn new(config: PostProcessingConfig, zones: Option<ZoneTable>) -> Self {
        Self {
            config,
            classifier: zones.map(ZoneClassifier::new),
        }
    }

    /// Build from configuration, loading the zone table if a path is set
    pub fn from_config(config: PostProcessingConfig) -> Result<Self> {
        let zones = config
            .zone_table_path
            .as_deref()
            .map(ZoneTable::load)
            .transpose()?;
        Ok(Self::new(config, zones))
    }

    /// Run every stage over `table`
    pub fn process(&self, table: &Table) -> Result<Table> {
        let mut current = table.clone();

        if let Some(join) = &self.config.zone_override {
            current = self.join("zone override", &current, join, Merge::Overwrite)?;
        }
        if let Some(join) = &self.config.project_mapping {
            current = self.join("project mapping", &current, join, Merge::Overwrite)?;
        }
        if let Some(join) = &self.config.rerated_cost {
            current = self.join("re-rated cost", &current, join, Merge::Coalesce)?;
        }

        current = normalize_carriers(
            &current,
            &self.config.carrier_column,
            &self.config.service_column,
        )?;

        match &self.classifier {
            Some(classifier) => {
                let columns = ZoneColumns::new(
                    &self.config.carrier_column,
                    &self.config.country_column,
                    &self.config.zone_column,
                );
                current = classifier.fill_zones(&current, &columns)?;
            }
            None => tracing::warn!("No zone table loaded; zone gaps left empty"),
        }

        tracing::info!(
            input_rows = table.len(),
            output_rows = current.len(),
            "Post-processing complete"
        );
        Ok(current)
    }

    /// Read an export CSV, process it and write the result
    pub fn process_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<WrittenFile> {
        let input = input.as_ref();
        tracing::info!(input = %input.display(), "Post-processing file");

        let table = read_table(input, TableEncoding::Utf8)?;
        let processed = self.process(&table)?;
        let file = write_processed(&processed, output)?;

        tracing::info!(
            path = %file.path.display(),
            rows = file.rows,
            checksum = %file.checksum,
            "Post-processed file written"
        );
        Ok(file)
    }

    fn join(&self, stage: &str, base: &Table, config: &JoinTableConfig, merge: Merge) -> Result<Table> {
        let aux = read_table(&config.path, config.encoding)?;
        tracing::info!(
            stage = %stage,
            path = %config.path,
            rows = aux.len(),
            "Joining reference table"
        );
        left_join(base, &aux, &JoinSpec::from_config(config, merge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::write_table;
    use tempfile::TempDir;

    fn export_table() -> Table {
        let rows = [
            ["1", "1Z1", "", "UPS Ground", "CA", "10.00", "A", ""],
            ["2", "9400", "Stamps.com", "Priority Mail", "DE", "5.00", "B", ""],
            ["3", "7700", "FedEx", "FedEx Ground", "US", "7.50", "C", ""],
        ];
        Table::with_rows(
            ["ship_id", "tracking", "carrier", "service", "country", "cost", "sku", "zone"],
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn write_csv(dir: &TempDir, name: &str, columns: &[&str], rows: &[&[&str]]) -> String {
        let path = dir.path().join(name);
        let table = Table::with_rows(
            columns.iter().copied(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
        .unwrap();
        write_table(&table, &path).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn join_config(path: String, left: &str, right: &str, value: &str, target: &str) -> JoinTableConfig {
        JoinTableConfig {
            path,
            encoding: TableEncoding::Utf8,
            left_key: left.to_string(),
            right_key: right.to_string(),
            value_column: value.to_string(),
            target: target.to_string(),
        }
    }

    fn zones() -> ZoneTable {
        ZoneTable::from_json_str(r#"{"ups": {"4": ["CA"]}, "fedex": {"A": ["US"]}, "usps": {"9": ["DE"]}}"#)
            .unwrap()
    }

    #[test]
    fn test_full_pipeline() {
        let dir = TempDir::new().unwrap();
        let zone_csv = write_csv(&dir, "zones.csv", &["Shipment ID", "Zone"], &[&["3", "2"]]);
        let project_csv = write_csv(&dir, "projects.csv", &["SKU", "Project"], &[&["A", "Alpha"]]);
        let cost_csv = write_csv(
            &dir,
            "rerated.csv",
            &["Tracking Number", "Cost"],
            &[&["1Z1", "8.25"], &["9400", ""]],
        );

        let config = PostProcessingConfig {
            zone_override: Some(join_config(zone_csv, "ship_id", "Shipment ID", "Zone", "Zone")),
            project_mapping: Some(join_config(project_csv, "sku", "SKU", "Project", "project")),
            rerated_cost: Some(join_config(cost_csv, "tracking", "Tracking Number", "Cost", "cost")),
            ..Default::default()
        };

        let processor = PostProcessor::new(config, Some(zones()));
        let out = processor.process(&export_table()).unwrap();

        assert_eq!(out.len(), 3);
        // carrier normalization
        assert_eq!(out.get(0, "carrier"), Some("UPS"));
        assert_eq!(out.get(1, "carrier"), Some("USPS"));
        assert_eq!(out.get(2, "carrier"), Some("FedEx"));
        // cost coalesce
        assert_eq!(out.get(0, "cost"), Some("8.25"));
        assert_eq!(out.get(1, "cost"), Some("5.00"));
        // project mapping
        assert_eq!(out.get(0, "project"), Some("Alpha"));
        assert_eq!(out.get(1, "project"), Some(""));
        // zone override wins, gaps filled using normalized carrier
        assert_eq!(out.get(2, "zone"), Some("2"));
        assert_eq!(out.get(0, "zone"), Some("4"));
        assert_eq!(out.get(1, "zone"), Some("9"));
    }

    #[test]
    fn test_without_joins_or_zone_table() {
        let processor = PostProcessor::new(PostProcessingConfig::default(), None);
        let out = processor.process(&export_table()).unwrap();

        assert_eq!(out.columns(), export_table().columns());
        assert_eq!(out.get(0, "carrier"), Some("UPS"));
        assert_eq!(out.get(0, "zone"), Some(""));
    }

    #[test]
    fn test_missing_reference_file_is_error() {
        let config = PostProcessingConfig {
            project_mapping: Some(join_config(
                "/nonexistent/projects.csv".to_string(),
                "sku",
                "SKU",
                "Project",
                "project",
            )),
            ..Default::default()
        };
        let processor = PostProcessor::new(config, None);
        assert!(processor.process(&export_table()).is_err());
    }

    #[test]
    fn test_process_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("out.csv");
        let output = dir.path().join("clean.csv");
        write_table(&export_table(), &input).unwrap();

        let processor = PostProcessor::new(PostProcessingConfig::default(), Some(zones()));
        let file = processor.process_file(&input, &output).unwrap();

        assert_eq!(file.rows, 3);
        let written = read_table(&output, TableEncoding::Utf8).unwrap();
        assert_eq!(written.get(0, "zone"), Some("4"));
    }

    #[test]
    fn test_from_config_loads_zone_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zones.json");
        std::fs::write(&path, r#"{"ups": {"4": ["CA"]}}"#).unwrap();

        let config = PostProcessingConfig {
            zone_table_path: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let processor = PostProcessor::from_config(config).unwrap();
        let out = processor.process(&export_table()).unwrap();
        assert_eq!(out.get(0, "zone"), Some("4"));
    }
}
