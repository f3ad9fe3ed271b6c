use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Name of the env var holding the spreadsheet web-app endpoint.
pub const CATALOG_URL_VAR: &str = "GAS_WEBAPP_URL";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
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
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset; `.env` templates often ship `KEY=`.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_page_size = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let catalog_url = optional(CATALOG_URL_VAR);
    let log_level = or_default("GSDESK_LOG_LEVEL", "info");
    let user_agent = or_default("GSDESK_USER_AGENT", "gsdesk/0.1 (catalog-sync)");
    let formats_path = optional("GSDESK_FORMATS_PATH").map(PathBuf::from);
    let output_dir = PathBuf::from(or_default("GSDESK_OUTPUT_DIR", "."));
    let page_size = parse_page_size("GSDESK_PAGE_SIZE", "100")?;

    Ok(AppConfig {
        catalog_url,
        log_level,
        user_agent,
        formats_path,
        output_dir,
        page_size,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
