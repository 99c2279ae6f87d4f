//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Shipex configuration file.

use crate::config::{load_config, JoinTableConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as well; a failure here covers both
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  ShipStation API: {}", config.shipstation.base_url);
                println!("  Page Size: {}", config.shipstation.page_size);
                println!(
                    "  Date Range: {}",
                    config
                        .export
                        .date_range()
                        .map(|r| r.to_string())
                        .unwrap_or_else(|_| "not set (use --from/--to)".to_string())
                );
                println!("  Order Lookback: {} days", config.export.order_lookback_days);
                println!("  Export File: {}", config.export.output_path);
                println!(
                    "  Retries: shipments {}, order lookups {}, requests {}",
                    config.retry.empty_shipment_attempts,
                    config.retry.order_lookup_attempts,
                    config.retry.request_attempts
                );

                let post = &config.post_processing;
                if post.enabled {
                    println!("  Processed File: {}", post.output_path);
                    println!(
                        "  Zone Table: {}",
                        post.zone_table_path.as_deref().unwrap_or("none")
                    );
                    println!("  Zone Override: {}", describe(post.zone_override.as_ref()));
                    println!("  Project Mapping: {}", describe(post.project_mapping.as_ref()));
                    println!("  Re-rated Cost: {}", describe(post.rerated_cost.as_ref()));
                } else {
                    println!("  Post-processing: disabled");
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

fn describe(join: Option<&JoinTableConfig>) -> String {
    match join {
        Some(j) => format!("{} ({} = {})", j.path, j.left_key, j.right_key),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::TableEncoding;

    #[test]
    fn test_describe_join() {
        let join = JoinTableConfig {
            path: "zones.csv".to_string(),
            encoding: TableEncoding::Latin1,
            left_key: "ship_id".to_string(),
            right_key: "Shipment ID".to_string(),
            value_column: "Zone".to_string(),
            target: "zone".to_string(),
        };
        assert_eq!(describe(Some(&join)), "zones.csv (ship_id = Shipment ID)");
        assert_eq!(describe(None), "none");
    }

    #[tokio::test]
    async fn test_missing_config_is_config_error() {
        let args = ValidateArgs {};
        let code = args.execute("/nonexistent/shipex.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
