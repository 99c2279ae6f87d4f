// Shipex - ShipStation shipment export ETL Tool
// Copyright (c) 2025 Shipex Contributors
// Licensed under the MIT License

//! # Shipex - ShipStation shipment export ETL
//!
//! Shipex pulls a ship-date range of shipments out of ShipStation, resolves
//! the orders, carriers and services they reference, and writes one CSV row
//! per shipment line item for shipping-cost analysis.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** shipments, orders, carriers and services via the ShipStation REST API
//! - **Reconciling** orders from a widened bulk search plus per-order fallback lookups
//! - **Enriching** shipments into flat export records
//! - **Post-processing** with reference joins, carrier normalization and zone classification
//!
//! ## Architecture
//!
//! Shipex follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (fetch, reconcile, transform, tables, zones, export)
//! - [`adapters`] - External integrations (ShipStation)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shipex::adapters::shipstation::ShipStationClient;
//! use shipex::config::load_config;
//! use shipex::core::export::ExportCoordinator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("shipex.toml")?;
//!     let range = config.export.date_range()?;
//!
//!     let client = ShipStationClient::new(config.shipstation.clone())?;
//!     let coordinator = ExportCoordinator::new(config, Arc::new(client), None);
//!
//!     let summary = coordinator.execute_export(&range).await?;
//!     println!("Exported {} records", summary.records_written());
//!     Ok(())
//! }
//! ```
//!
//! ## Zone Classification
//!
//! International zones come from a carrier → zone → countries table:
//!
//! ```rust
//! use shipex::core::zones::{ZoneClassifier, ZoneTable};
//!
//! let table = ZoneTable::from_json_str(r#"{"ups": {"4": ["CA", "MX"]}}"#).unwrap();
//! let classifier = ZoneClassifier::new(table);
//!
//! assert_eq!(classifier.classify(Some("CA"), Some("UPS")), Some("4".to_string()));
//! assert_eq!(classifier.classify(Some("JP"), Some("UPS")), None);
//! ```
//!
//! ## Error Handling
//!
//! Shipex uses the [`domain::ShipexError`] type for all errors:
//!
//! ```rust,no_run
//! use shipex::domain::ShipexError;
//!
//! fn example() -> Result<(), ShipexError> {
//!     let config = shipex::config::load_config("shipex.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Shipex uses structured logging with the `tracing` crate. Every line of an
//! export run carries the run id of its `export_run` span.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
