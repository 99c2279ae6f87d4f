//! Core business logic for Shipex.
//!
//! # Modules
//!
//! - [`fetch`] - Remote reads with retry policies applied
//! - [`reconcile`] - Bulk plus per-order fallback order resolution
//! - [`transform`] - Record enrichment and carrier normalization
//! - [`table`] - Tabular data, CSV I/O and left joins
//! - [`zones`] - Zone reference table and classifier
//! - [`export`] - Run orchestration, output writing and post-processing
//! - [`retry`] - Retry policy abstraction
//!
//! # Export Workflow
//!
//! 1. **Fetch shipments** for the ship-date range
//! 2. **Fetch carriers, services and bulk orders** concurrently
//! 3. **Backfill orders** missing from the bulk search
//! 4. **Enrich**: one record per line item, excluding voided shipments and
//!    shipments without an order or items
//! 5. **Write** the raw export
//! 6. **Post-process**: reference joins, carrier normalization, zone gap fill
//!
//! # Example
//!
//! ```rust,no_run
//! use shipex::adapters::shipstation::ShipStationClient;
//! use shipex::config::load_config;
//! use shipex::core::export::ExportCoordinator;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shipex.toml")?;
//! let range = config.export.date_range()?;
//! let client = ShipStationClient::new(config.shipstation.clone())?;
//!
//! let coordinator = ExportCoordinator::new(config, Arc::new(client), None);
//! let summary = coordinator.execute_export(&range).await?;
//!
//! println!("Records: {}", summary.records_written());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod fetch;
pub mod reconcile;
pub mod retry;
pub mod table;
pub mod transform;
pub mod zones;
