//! Configuration management for Shipex.
//!
//! Shipex uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SHIPEX_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shipex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shipex.toml")?;
//! println!("ShipStation URL: {}", config.shipstation.base_url);
//! println!("Export file: {}", config.export.output_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [shipstation]
//! api_key = "${SHIPEX_SHIPSTATION_API_KEY}"
//! api_secret = "${SHIPEX_SHIPSTATION_API_SECRET}"
//!
//! [export]
//! from_date = "2024-02-01"
//! to_date = "2024-02-29"
//! output_path = "out.csv"
//!
//! [post_processing]
//! zone_table_path = "int_shipping_zones_country_codes.json"
//!
//! [post_processing.zone_override]
//! path = "zones.csv"
//! encoding = "latin1"
//! left_key = "ship_id"
//! right_key = "Shipment ID"
//! value_column = "Zone"
//! target = "zone"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ExportConfig, JoinTableConfig, LoggingConfig, PostProcessingConfig,
    RetryConfig, ShipStationConfig, ShipexConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
