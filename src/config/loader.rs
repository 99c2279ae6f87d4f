//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ShipexConfig;
use crate::config::secret_string;
use crate::domain::errors::ShipexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ShipexConfig
/// 4. Applies environment variable overrides (SHIPEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a referenced
/// environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use shipex::config::loader::load_config;
///
/// let config = load_config("shipex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ShipexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShipexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ShipexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ShipexConfig = toml::from_str(&contents)
        .map_err(|e| ShipexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ShipexError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ShipexError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ShipexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using SHIPEX_* prefix
///
/// Environment variables follow the pattern: SHIPEX_<SECTION>_<KEY>
/// For example: SHIPEX_SHIPSTATION_BASE_URL, SHIPEX_EXPORT_FROM_DATE
fn apply_env_overrides(config: &mut ShipexConfig) {
    if let Ok(val) = std::env::var("SHIPEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // ShipStation overrides
    if let Ok(val) = std::env::var("SHIPEX_SHIPSTATION_BASE_URL") {
        config.shipstation.base_url = val;
    }
    if let Ok(val) = std::env::var("SHIPEX_SHIPSTATION_API_KEY") {
        config.shipstation.api_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("SHIPEX_SHIPSTATION_API_SECRET") {
        config.shipstation.api_secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("SHIPEX_SHIPSTATION_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.shipstation.timeout_seconds = timeout;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("SHIPEX_EXPORT_FROM_DATE") {
        config.export.from_date = Some(val);
    }
    if let Ok(val) = std::env::var("SHIPEX_EXPORT_TO_DATE") {
        config.export.to_date = Some(val);
    }
    if let Ok(val) = std::env::var("SHIPEX_EXPORT_ORDER_LOOKBACK_DAYS") {
        if let Ok(days) = val.parse() {
            config.export.order_lookback_days = days;
        }
    }
    if let Ok(val) = std::env::var("SHIPEX_EXPORT_OUTPUT_PATH") {
        config.export.output_path = val;
    }

    // Retry overrides
    if let Ok(val) = std::env::var("SHIPEX_RETRY_EMPTY_SHIPMENT_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.retry.empty_shipment_attempts = attempts;
        }
    }
    if let Ok(val) = std::env::var("SHIPEX_RETRY_ORDER_LOOKUP_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.retry.order_lookup_attempts = attempts;
        }
    }

    // Post-processing overrides
    if let Ok(val) = std::env::var("SHIPEX_POST_PROCESSING_ENABLED") {
        config.post_processing.enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SHIPEX_POST_PROCESSING_OUTPUT_PATH") {
        config.post_processing.output_path = val;
    }
    if let Ok(val) = std::env::var("SHIPEX_POST_PROCESSING_ZONE_TABLE_PATH") {
        config.post_processing.zone_table_path = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SHIPEX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SHIPEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("SHIPEX_LOADER_TEST_VAR", "test_value");
        let input = "api_key = \"${SHIPEX_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"");
        std::env::remove_var("SHIPEX_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SHIPEX_LOADER_MISSING_VAR");
        let input = "api_key = \"${SHIPEX_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("SHIPEX_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# api_key = \"${SHIPEX_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[shipstation]
api_key = "key"
api_secret = "secret"

[export]
from_date = "2024-02-01"
to_date = "2024-02-29"
order_lookback_days = 15

[logging]
local_enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.shipstation.base_url, "https://ssapi.shipstation.com");
        assert_eq!(config.shipstation.api_key.expose_secret(), "key");
        assert_eq!(config.export.order_lookback_days, 15);
        assert_eq!(config.retry.order_lookup_attempts, 5);
        assert!(config.post_processing.enabled);
        assert!(!config.logging.local_enabled);
    }
}
