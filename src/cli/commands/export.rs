//! Export command implementation
//!
//! This module implements the `export` command for exporting shipments
//! from ShipStation to CSV.

use crate::adapters::shipstation::ShipStationClient;
use crate::config::{load_config, ShipexConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::core::zones::ZoneTable;
use crate::domain::{ShipStationError, ShipexError};
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// First ship date included (YYYY-MM-DD), overrides export.from_date
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last ship date included (YYYY-MM-DD), overrides export.to_date
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Raw export path, overrides export.output_path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write only the raw export
    #[arg(long)]
    pub skip_post_processing: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let range = match config.export.date_range() {
            Ok(range) => range,
            Err(e) => {
                tracing::error!(error = %e, "No usable date range");
                eprintln!("No usable date range: {e}");
                eprintln!("Set export.from_date/export.to_date or pass --from/--to");
                return Ok(2);
            }
        };

        let zones = if config.post_processing.enabled {
            match config.post_processing.zone_table_path.as_deref() {
                Some(path) => match ZoneTable::load(path) {
                    Ok(table) => Some(table),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to load zone table");
                        eprintln!("Failed to load zone table: {e}");
                        return Ok(2);
                    }
                },
                None => None,
            }
        } else {
            None
        };

        tracing::info!("Creating ShipStation client");
        let client = match ShipStationClient::new(config.shipstation.clone()) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create ShipStation client");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4);
            }
        };

        println!("🚀 Starting export for {range}...");
        println!();

        let coordinator = ExportCoordinator::new(config, Arc::new(client), zones);
        let summary = match coordinator.execute_export(&range).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        print_summary(&summary);
        Ok(0)
    }

    fn apply_overrides(&self, config: &mut ShipexConfig) {
        if let Some(from) = &self.from {
            tracing::info!(from = %from, "Overriding export start date from CLI");
            config.export.from_date = Some(from.clone());
        }

        if let Some(to) = &self.to {
            tracing::info!(to = %to, "Overriding export end date from CLI");
            config.export.to_date = Some(to.clone());
        }

        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding export output path from CLI");
            config.export.output_path = output.clone();
        }

        if self.skip_post_processing {
            tracing::info!("Post-processing disabled from CLI");
            config.post_processing.enabled = false;
        }
    }
}

/// Exit code for a failed run
///
/// Rejected credentials and unreachable hosts are connection errors (4);
/// anything else is fatal (5).
pub fn exit_code_for(error: &ShipexError) -> i32 {
    match error {
        ShipexError::ShipStation(
            ShipStationError::AuthenticationFailed(_)
            | ShipStationError::ConnectionFailed(_)
            | ShipStationError::Timeout(_),
        ) => 4,
        ShipexError::Configuration(_) => 2,
        _ => 5,
    }
}

fn print_summary(summary: &ExportSummary) {
    println!("📊 Export Summary:");
    println!("  Run ID: {}", summary.run_id);
    println!("  Range: {}", summary.range);
    println!("  Shipments Fetched: {}", summary.shipments_fetched);
    println!("  Orders (bulk): {}", summary.orders_bulk);
    println!("  Orders (backfilled): {}", summary.orders_backfilled);
    println!("  Orders Missing: {}", summary.orders_missing);
    println!("  Skipped (voided): {}", summary.voided_skipped);
    println!("  Skipped (no order): {}", summary.order_missing_skipped);
    println!("  Skipped (no items): {}", summary.items_missing_skipped);
    println!("  Records Written: {}", summary.records_written());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    match &summary.export {
        Some(file) => {
            println!("📄 Export: {} ({} rows)", file.path.display(), file.rows);
            println!("   SHA-256: {}", file.checksum);
        }
        None => println!("ℹ️  No records for this range; no export file written"),
    }

    if let Some(file) = &summary.processed {
        println!("🧹 Processed: {} ({} rows)", file.path.display(), file.rows);
        println!("   SHA-256: {}", file.checksum);
    }
    println!();

    if summary.orders_missing > 0 {
        println!(
            "⚠️  {} order(s) could not be retrieved; their shipments were skipped",
            summary.orders_missing
        );
    }
    println!("✅ Export completed!");
}
