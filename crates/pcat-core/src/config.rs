use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let path_or_default =
        |var: &str, default: &str| -> PathBuf { PathBuf::from(or_default(var, default)) };

    let env = parse_environment(&or_default("PCAT_ENV", "development"))?;
    let log_level = or_default("PCAT_LOG_LEVEL", "info");

    let catalog_path = path_or_default("PCAT_CATALOG_PATH", "./backend/page_content.json");
    let rules_path = path_or_default("PCAT_RULES_PATH", "./config/rules.yaml");
    let products_dir = path_or_default("PCAT_PRODUCTS_DIR", "./products");
    let images_dir = path_or_default("PCAT_IMAGES_DIR", "./images/products");
    let images_base_url = or_default("PCAT_IMAGES_BASE_URL", "/images/products");
    let spreadsheet_path = lookup("PCAT_SPREADSHEET_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let image_mapping_path =
        path_or_default("PCAT_IMAGE_MAPPING_PATH", "./backend/image_mapping.json");
    let report_path = path_or_default("PCAT_REPORT_PATH", "./backend/validation_report.json");

    let bgn_to_eur_rate = parse_rate(&or_default("PCAT_BGN_TO_EUR_RATE", "1.95583"))?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        rules_path,
        products_dir,
        images_dir,
        images_base_url,
        spreadsheet_path,
        image_mapping_path,
        report_path,
        bgn_to_eur_rate,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PCAT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// The rate must be a strictly positive decimal.
fn parse_rate(raw: &str) -> Result<Decimal, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "PCAT_BGN_TO_EUR_RATE".to_string(),
        reason,
    };
    let rate = Decimal::from_str(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if rate <= Decimal::ZERO {
        return Err(invalid(format!("rate must be positive, got {rate}")));
    }
    Ok(rate)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
