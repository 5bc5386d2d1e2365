use crate::app_config::{AppConfig, CachePolicy};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable has an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; use it when
/// the caller manages env setup itself.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable has an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup instead of
/// `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let catalog_base_url = or_default("STOREFRONT_CATALOG_BASE_URL", "https://fakestoreapi.com");
    let request_timeout_secs = parse_u64("STOREFRONT_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1 (catalog-demo)");

    let cache_policy = or_default("STOREFRONT_CACHE_POLICY", "cache-indefinitely")
        .parse::<CachePolicy>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "STOREFRONT_CACHE_POLICY".to_string(),
            reason,
        })?;

    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");

    Ok(AppConfig {
        catalog_base_url,
        request_timeout_secs,
        user_agent,
        cache_policy,
        log_level,
    })
}
