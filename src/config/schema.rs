//! Configuration schema types
//!
//! This module defines the configuration structure for Shipex.

use crate::config::SecretString;
use crate::core::table::TableEncoding;
use crate::domain::DateRange;
use serde::{Deserialize, Serialize};

/// Main Shipex configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// ShipStation API connection
    pub shipstation: ShipStationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Retry ceilings and backoff
    #[serde(default)]
    pub retry: RetryConfig,

    /// Post-processing joins and zone classification
    #[serde(default)]
    pub post_processing: PostProcessingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShipexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.shipstation.validate()?;
        self.export.validate()?;
        self.retry.validate()?;
        self.post_processing.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// ShipStation API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipStationConfig {
    /// Base URL of the ShipStation REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (basic auth username)
    /// Stored securely in memory and automatically zeroized on drop
    pub api_key: SecretString,

    /// API secret (basic auth password)
    pub api_secret: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Page size for paginated list endpoints
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl ShipStationConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("shipstation.base_url is not a valid URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("shipstation.base_url must start with http:// or https://".to_string());
        }

        if self.api_key.expose_secret().is_empty() {
            return Err("shipstation.api_key cannot be empty".to_string());
        }

        if self.api_secret.expose_secret().is_empty() {
            return Err("shipstation.api_secret cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("shipstation.timeout_seconds must be > 0".to_string());
        }

        if !(1..=500).contains(&self.page_size) {
            return Err(format!(
                "shipstation.page_size must be between 1 and 500, got {}",
                self.page_size
            ));
        }

        Ok(())
    }
}

impl Default for ShipStationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: crate::config::secret_string(String::new()),
            api_secret: crate::config::secret_string(String::new()),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// First ship date included (YYYY-MM-DD)
    #[serde(default)]
    pub from_date: Option<String>,

    /// Last ship date included (YYYY-MM-DD)
    #[serde(default)]
    pub to_date: Option<String>,

    /// How many days before `from_date` the bulk order search starts
    #[serde(default = "default_order_lookback_days")]
    pub order_lookback_days: i64,

    /// Raw export CSV path
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl ExportConfig {
    /// Resolve the configured date range
    ///
    /// # Errors
    ///
    /// Returns an error if either date is missing or malformed.
    pub fn date_range(&self) -> Result<DateRange, String> {
        match (&self.from_date, &self.to_date) {
            (Some(from), Some(to)) => DateRange::parse(from, to),
            _ => Err("export.from_date and export.to_date are required".to_string()),
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.from_date.is_some() || self.to_date.is_some() {
            self.date_range()?;
        }

        if !(0..=365).contains(&self.order_lookback_days) {
            return Err(format!(
                "export.order_lookback_days must be between 0 and 365, got {}",
                self.order_lookback_days
            ));
        }

        if self.output_path.trim().is_empty() {
            return Err("export.output_path cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            from_date: None,
            to_date: None,
            order_lookback_days: default_order_lookback_days(),
            output_path: default_output_path(),
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Attempts made while the shipment search comes back empty
    #[serde(default = "default_attempts")]
    pub empty_shipment_attempts: u32,

    /// Pause between empty shipment searches in milliseconds
    #[serde(default)]
    pub empty_shipment_delay_ms: u64,

    /// Attempts for an individual order lookup
    #[serde(default = "default_attempts")]
    pub order_lookup_attempts: u32,

    /// Backoff unit for order lookups; attempt `n` waits `unit * 2^n`
    #[serde(default = "default_backoff_unit_ms")]
    pub order_lookup_backoff_ms: u64,

    /// Attempts for carrier, service and bulk order requests
    #[serde(default = "default_request_attempts")]
    pub request_attempts: u32,

    /// Backoff unit for carrier, service and bulk order requests
    #[serde(default = "default_backoff_unit_ms")]
    pub request_backoff_ms: u64,

    /// Upper bound on any single backoff delay
    #[serde(default = "default_max_delay_ms")]
    pub request_max_delay_ms: u64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("retry.empty_shipment_attempts", self.empty_shipment_attempts),
            ("retry.order_lookup_attempts", self.order_lookup_attempts),
            ("retry.request_attempts", self.request_attempts),
        ] {
            if !(1..=10).contains(&value) {
                return Err(format!("{name} must be between 1 and 10, got {value}"));
            }
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            empty_shipment_attempts: default_attempts(),
            empty_shipment_delay_ms: 0,
            order_lookup_attempts: default_attempts(),
            order_lookup_backoff_ms: default_backoff_unit_ms(),
            request_attempts: default_request_attempts(),
            request_backoff_ms: default_backoff_unit_ms(),
            request_max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// One auxiliary CSV joined onto the export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinTableConfig {
    /// Path to the auxiliary CSV
    pub path: String,

    /// Text encoding of the auxiliary CSV
    #[serde(default)]
    pub encoding: TableEncoding,

    /// Key column in the export
    pub left_key: String,

    /// Key column in the auxiliary CSV
    pub right_key: String,

    /// Value column taken from the auxiliary CSV
    pub value_column: String,

    /// Column name the value lands in (lowercased)
    pub target: String,
}

impl JoinTableConfig {
    fn validate(&self, section: &str) -> Result<(), String> {
        for (field, value) in [
            ("path", &self.path),
            ("left_key", &self.left_key),
            ("right_key", &self.right_key),
            ("value_column", &self.value_column),
            ("target", &self.target),
        ] {
            if value.trim().is_empty() {
                return Err(format!("post_processing.{section}.{field} cannot be empty"));
            }
        }
        Ok(())
    }
}

/// Post-processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostProcessingConfig {
    /// Run post-processing after the raw export
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cleaned CSV path
    #[serde(default = "default_processed_path")]
    pub output_path: String,

    /// Country → zone reference JSON; zone gap fill is skipped without it
    #[serde(default)]
    pub zone_table_path: Option<String>,

    /// Carrier column used for normalization and zone lookup
    #[serde(default = "default_carrier_column")]
    pub carrier_column: String,

    /// Service column used for carrier inference
    #[serde(default = "default_service_column")]
    pub service_column: String,

    /// Country column used for zone lookup
    #[serde(default = "default_country_column")]
    pub country_column: String,

    /// Zone column written by joins and classification
    #[serde(default = "default_zone_column")]
    pub zone_column: String,

    /// Authoritative zone export keyed by shipment id
    #[serde(default)]
    pub zone_override: Option<JoinTableConfig>,

    /// SKU → project name mapping
    #[serde(default)]
    pub project_mapping: Option<JoinTableConfig>,

    /// Re-rated label costs keyed by tracking number
    #[serde(default)]
    pub rerated_cost: Option<JoinTableConfig>,
}

impl PostProcessingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.output_path.trim().is_empty() {
            return Err("post_processing.output_path cannot be empty".to_string());
        }
        if let Some(join) = &self.zone_override {
            join.validate("zone_override")?;
        }
        if let Some(join) = &self.project_mapping {
            join.validate("project_mapping")?;
        }
        if let Some(join) = &self.rerated_cost {
            join.validate("rerated_cost")?;
        }
        Ok(())
    }
}

impl Default for PostProcessingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_path: default_processed_path(),
            zone_table_path: None,
            carrier_column: default_carrier_column(),
            service_column: default_service_column(),
            country_column: default_country_column(),
            zone_column: default_zone_column(),
            zone_override: None,
            project_mapping: None,
            rerated_cost: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://ssapi.shipstation.com".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> u32 {
    500
}

fn default_order_lookback_days() -> i64 {
    30
}

fn default_output_path() -> String {
    "out.csv".to_string()
}

fn default_attempts() -> u32 {
    5
}

fn default_request_attempts() -> u32 {
    3
}

fn default_backoff_unit_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_processed_path() -> String {
    "clean_shipping_data.csv".to_string()
}

fn default_carrier_column() -> String {
    "carrier".to_string()
}

fn default_service_column() -> String {
    "service".to_string()
}

fn default_country_column() -> String {
    "country".to_string()
}

fn default_zone_column() -> String {
    "zone".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
