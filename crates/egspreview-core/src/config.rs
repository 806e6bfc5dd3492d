use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_GRAPHQL_URL: &str = "https://www.epicgames.com/graphql";
const DEFAULT_PRODUCT_API_URL: &str =
    "https://egs-platform-service.store.epicgames.com/api/v1/egs/products";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let require_http_url = |var: &str, raw: String| -> Result<String, ConfigError> {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("\"{raw}\" is not an absolute http(s) URL"),
            })
        }
    };

    let relay_url = require_http_url("EGSPREVIEW_RELAY_URL", require("EGSPREVIEW_RELAY_URL")?)?;

    let env = parse_environment(&or_default("EGSPREVIEW_ENV", "development"));

    let raw_bind = or_default("EGSPREVIEW_BIND_ADDR", "0.0.0.0:3000");
    let bind_addr = raw_bind
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "EGSPREVIEW_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;

    let log_level = or_default("EGSPREVIEW_LOG_LEVEL", "info");
    let relay_session = or_default("EGSPREVIEW_RELAY_SESSION", "egs");
    let graphql_url = require_http_url(
        "EGSPREVIEW_GRAPHQL_URL",
        or_default("EGSPREVIEW_GRAPHQL_URL", DEFAULT_GRAPHQL_URL),
    )?;
    let product_api_url = require_http_url(
        "EGSPREVIEW_PRODUCT_API_URL",
        or_default("EGSPREVIEW_PRODUCT_API_URL", DEFAULT_PRODUCT_API_URL),
    )?;
    let product_country = or_default("EGSPREVIEW_PRODUCT_COUNTRY", "DE");
    let user_agent = or_default("EGSPREVIEW_USER_AGENT", "egspreview/0.1 (link-preview)");

    let request_timeout_secs = match lookup("EGSPREVIEW_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "EGSPREVIEW_REQUEST_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })?,
        ),
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        relay_url,
        relay_session,
        graphql_url,
        product_api_url,
        product_country,
        user_agent,
        request_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
