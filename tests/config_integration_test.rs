//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use secrecy::ExposeSecret;
use shipex::config::load_config;
use shipex::core::table::TableEncoding;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("SHIPEX_APPLICATION_LOG_LEVEL");
    std::env::remove_var("SHIPEX_SHIPSTATION_API_KEY");
    std::env::remove_var("SHIPEX_SHIPSTATION_API_SECRET");
    std::env::remove_var("SHIPEX_EXPORT_FROM_DATE");
    std::env::remove_var("SHIPEX_EXPORT_TO_DATE");
    std::env::remove_var("SHIPEX_EXPORT_ORDER_LOOKBACK_DAYS");
    std::env::remove_var("SHIPEX_RETRY_ORDER_LOOKUP_ATTEMPTS");
    std::env::remove_var("SHIPEX_POST_PROCESSING_ENABLED");
    std::env::remove_var("TEST_SHIPSTATION_KEY");
    std::env::remove_var("TEST_SHIPSTATION_SECRET");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let toml_content = r#"
[application]
log_level = "debug"

[shipstation]
base_url = "https://ssapi.example.com"
api_key = "test-key"
api_secret = "test-secret"
timeout_seconds = 30
page_size = 100

[export]
from_date = "2024-02-01"
to_date = "2024-02-29"
order_lookback_days = 45
output_path = "exports/feb.csv"

[retry]
empty_shipment_attempts = 3
empty_shipment_delay_ms = 250
order_lookup_attempts = 4
order_lookup_backoff_ms = 500
request_attempts = 2

[post_processing]
enabled = true
output_path = "exports/feb_clean.csv"
zone_table_path = "int_shipping_zones_country_codes.json"

[post_processing.zone_override]
path = "zones.csv"
encoding = "latin1"
left_key = "ship_id"
right_key = "Shipment ID"
value_column = "Zone"
target = "zone"

[post_processing.rerated_cost]
path = "rerated.csv"
left_key = "tracking"
right_key = "Tracking Number"
value_column = "Cost"
target = "cost"

[logging]
local_enabled = false
local_path = "/tmp/shipex"
local_rotation = "hourly"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");

    assert_eq!(config.shipstation.base_url, "https://ssapi.example.com");
    assert_eq!(config.shipstation.api_key.expose_secret(), "test-key");
    assert_eq!(config.shipstation.api_secret.expose_secret(), "test-secret");
    assert_eq!(config.shipstation.timeout_seconds, 30);
    assert_eq!(config.shipstation.page_size, 100);

    let range = config.export.date_range().unwrap();
    assert_eq!(range.to_string(), "2024-02-01..2024-02-29");
    assert_eq!(config.export.order_lookback_days, 45);
    assert_eq!(config.export.output_path, "exports/feb.csv");

    assert_eq!(config.retry.empty_shipment_attempts, 3);
    assert_eq!(config.retry.empty_shipment_delay_ms, 250);
    assert_eq!(config.retry.order_lookup_attempts, 4);
    assert_eq!(config.retry.request_attempts, 2);

    let zone_override = config.post_processing.zone_override.as_ref().unwrap();
    assert_eq!(zone_override.encoding, TableEncoding::Latin1);
    assert_eq!(zone_override.right_key, "Shipment ID");
    let rerated = config.post_processing.rerated_cost.as_ref().unwrap();
    assert_eq!(rerated.encoding, TableEncoding::Utf8);
    assert!(config.post_processing.project_mapping.is_none());

    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[shipstation]
api_key = "key"
api_secret = "secret"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.shipstation.base_url, "https://ssapi.shipstation.com");
    assert_eq!(config.shipstation.page_size, 500);
    assert!(config.export.date_range().is_err());
    assert_eq!(config.export.order_lookback_days, 30);
    assert_eq!(config.export.output_path, "out.csv");
    assert_eq!(config.retry.empty_shipment_attempts, 5);
    assert_eq!(config.retry.empty_shipment_delay_ms, 0);
    assert_eq!(config.retry.order_lookup_attempts, 5);
    assert_eq!(config.retry.order_lookup_backoff_ms, 1000);
    assert!(config.post_processing.enabled);
    assert_eq!(config.post_processing.output_path, "clean_shipping_data.csv");
    assert!(config.post_processing.zone_table_path.is_none());
    assert!(config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_SHIPSTATION_KEY", "substituted-key");
    std::env::set_var("TEST_SHIPSTATION_SECRET", "substituted-secret");

    let toml_content = r#"
[shipstation]
api_key = "${TEST_SHIPSTATION_KEY}"
api_secret = "${TEST_SHIPSTATION_SECRET}"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.shipstation.api_key.expose_secret(), "substituted-key");
    assert_eq!(
        config.shipstation.api_secret.expose_secret(),
        "substituted-secret"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[shipstation]
api_key = "${TEST_SHIPSTATION_KEY}"
api_secret = "secret"
"#;

    let temp_file = write_config(toml_content);
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_SHIPSTATION_KEY"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("SHIPEX_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("SHIPEX_EXPORT_FROM_DATE", "2024-03-01");
    std::env::set_var("SHIPEX_EXPORT_TO_DATE", "2024-03-31");
    std::env::set_var("SHIPEX_RETRY_ORDER_LOOKUP_ATTEMPTS", "2");
    std::env::set_var("SHIPEX_POST_PROCESSING_ENABLED", "false");

    let toml_content = r#"
[application]
log_level = "info"

[shipstation]
api_key = "key"
api_secret = "secret"

[export]
from_date = "2024-02-01"
to_date = "2024-02-29"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(
        config.export.date_range().unwrap().to_string(),
        "2024-03-01..2024-03-31"
    );
    assert_eq!(config.retry.order_lookup_attempts, 2);
    assert!(!config.post_processing.enabled);

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let invalid = [
        // unknown log level
        r#"
[application]
log_level = "loud"

[shipstation]
api_key = "key"
api_secret = "secret"
"#,
        // empty credentials
        r#"
[shipstation]
api_key = ""
api_secret = "secret"
"#,
        // reversed date range
        r#"
[shipstation]
api_key = "key"
api_secret = "secret"

[export]
from_date = "2024-03-01"
to_date = "2024-02-01"
"#,
        // attempts out of range
        r#"
[shipstation]
api_key = "key"
api_secret = "secret"

[retry]
order_lookup_attempts = 0
"#,
        // join table without a key
        r#"
[shipstation]
api_key = "key"
api_secret = "secret"

[post_processing.project_mapping]
path = "projects.csv"
left_key = ""
right_key = "SKU"
value_column = "Project"
target = "project"
"#,
    ];

    for content in invalid {
        let temp_file = write_config(content);
        assert!(load_config(temp_file.path()).is_err(), "accepted: {content}");
    }
}

#[test]
fn test_missing_config_file() {
    let result = load_config("/nonexistent/shipex.toml");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}
