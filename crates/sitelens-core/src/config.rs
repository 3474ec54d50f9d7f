use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let agent_api_key = require("SITELENS_AGENT_API_KEY")?;

    let env = parse_environment(&or_default("SITELENS_ENV", "development"));
    let bind_addr = parse_addr("SITELENS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SITELENS_LOG_LEVEL", "info");

    let agent_base_url = or_default("SITELENS_AGENT_BASE_URL", "https://api.openai.com/v1");
    let agent_model = or_default("SITELENS_AGENT_MODEL", "gpt-5");
    let agent_timeout_secs = parse_u64("SITELENS_AGENT_TIMEOUT_SECS", "30")?;

    // 24 hours.
    let cache_ttl_secs = parse_u64("SITELENS_CACHE_TTL_SECS", "86400")?;

    let scrape_timeout_secs = parse_u64("SITELENS_SCRAPE_TIMEOUT_SECS", "10")?;
    let scrape_user_agent = or_default(
        "SITELENS_SCRAPE_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        agent_api_key,
        agent_base_url,
        agent_model,
        agent_timeout_secs,
        cache_ttl_secs,
        scrape_timeout_secs,
        scrape_user_agent,
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
