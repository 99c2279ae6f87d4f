//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "shipex.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Shipex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your date range and reference files", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set SHIPEX_SHIPSTATION_API_KEY and SHIPEX_SHIPSTATION_API_SECRET");
                println!("  3. Validate configuration: shipex validate-config");
                println!("  4. Run export: shipex export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Shipex Configuration File
# ShipStation shipment export

[application]
log_level = "info"

[shipstation]
base_url = "https://ssapi.shipstation.com"
api_key = "${SHIPEX_SHIPSTATION_API_KEY}"
api_secret = "${SHIPEX_SHIPSTATION_API_SECRET}"

[export]
from_date = "2024-02-01"
to_date = "2024-02-29"
order_lookback_days = 30
output_path = "out.csv"

[retry]
empty_shipment_attempts = 5
order_lookup_attempts = 5

[post_processing]
enabled = true
output_path = "clean_shipping_data.csv"
# zone_table_path = "int_shipping_zones_country_codes.json"

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Shipex Configuration File
# ShipStation shipment export
#
# This file contains all configuration options with examples and explanations.
# Any value may reference an environment variable as ${VAR_NAME}, and every
# key can be overridden with SHIPEX_<SECTION>_<KEY>.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# ShipStation API
# ============================================================================
[shipstation]
# Base URL of the ShipStation REST API
base_url = "https://ssapi.shipstation.com"

# API key and secret (use environment variables)
api_key = "${SHIPEX_SHIPSTATION_API_KEY}"
api_secret = "${SHIPEX_SHIPSTATION_API_SECRET}"

# Request timeout in seconds
timeout_seconds = 60

# Page size for list endpoints (1-500)
page_size = 500

# ============================================================================
# Export Configuration
# ============================================================================
[export]
# Inclusive ship-date range (YYYY-MM-DD); --from/--to override these
from_date = "2024-02-01"
to_date = "2024-02-29"

# The bulk order search starts this many days before from_date, so orders
# placed before the range but shipped within it are found
order_lookback_days = 30

# Raw export CSV; no file is written when the range has no records
output_path = "out.csv"

# ============================================================================
# Retry Configuration
# ============================================================================
[retry]
# Attempts while the shipment search returns nothing
empty_shipment_attempts = 5
empty_shipment_delay_ms = 0

# Attempts per individual order lookup; attempt n waits backoff * 2^n
order_lookup_attempts = 5
order_lookup_backoff_ms = 1000

# Carrier, service and bulk order requests
request_attempts = 3
request_backoff_ms = 1000
request_max_delay_ms = 30000

# ============================================================================
# Post-processing
# ============================================================================
[post_processing]
# Run joins, carrier normalization and zone gap fill after the export
enabled = true
output_path = "clean_shipping_data.csv"

# Country -> zone reference, {"carrier": {"zone": ["CC", ...]}}
# zone_table_path = "int_shipping_zones_country_codes.json"

# Column names used by normalization and zone lookup
carrier_column = "carrier"
service_column = "service"
country_column = "country"
zone_column = "zone"

# Authoritative zones keyed by shipment id
# [post_processing.zone_override]
# path = "zones.csv"
# encoding = "latin1"
# left_key = "ship_id"
# right_key = "Shipment ID"
# value_column = "Zone"
# target = "zone"

# SKU -> project name
# [post_processing.project_mapping]
# path = "projects.csv"
# left_key = "sku"
# right_key = "SKU"
# value_column = "Project"
# target = "project"

# Re-rated label costs; blank values keep the exported cost
# [post_processing.rerated_cost]
# path = "rerated.csv"
# left_key = "tracking"
# right_key = "Tracking Number"
# value_column = "Cost"
# target = "cost"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON log file (shipex.log)
local_enabled = true

# Local log directory
local_path = "logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShipexConfig;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "shipex.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "shipex.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generated_configs_are_valid() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: ShipexConfig = toml::from_str(&content).unwrap();
            config.validate().unwrap();
            assert_eq!(config.export.order_lookback_days, 30);
        }
    }

    #[test]
    fn test_generated_config_uses_placeholders() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("${SHIPEX_SHIPSTATION_API_KEY}"));
        assert!(config.contains("${SHIPEX_SHIPSTATION_API_SECRET}"));
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shipex.toml");
        std::fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&path).unwrap().contains("[shipstation]"));
    }
}
