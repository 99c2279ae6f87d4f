//! External system integrations for Shipex.
//!
//! - [`shipstation`] - ShipStation REST API integration
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind a trait so the export
//! pipeline can be tested with in-memory implementations.
//!
//! ```rust,no_run
//! use shipex::adapters::shipstation::{ShipStationClient, ShippingSource};
//! use shipex::config::{secret_string, ShipStationConfig};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ShipStationConfig {
//!     api_key: secret_string("key".to_string()),
//!     api_secret: secret_string("secret".to_string()),
//!     ..Default::default()
//! };
//!
//! let source: Arc<dyn ShippingSource> = Arc::new(ShipStationClient::new(config)?);
//! # let _ = source;
//! # Ok(())
//! # }
//! ```

pub mod shipstation;
