use crate::app_config::{AppConfig, Environment, DEFAULT_LOCATOR_LIMIT};
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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        or_default(var, default)
            .parse::<f32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("EFARMER_ENV", "development"));
    let bind_addr = parse_addr("EFARMER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("EFARMER_LOG_LEVEL", "info");
    let facilities_path = PathBuf::from(or_default(
        "EFARMER_FACILITIES_PATH",
        "./config/facilities.yaml",
    ));

    // A blank key is the same as no key: the advisor stays in standby.
    let advisor_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let advisor_model = or_default("EFARMER_ADVISOR_MODEL", "gemini-3-flash-preview");
    let advisor_base_url = or_default(
        "EFARMER_ADVISOR_BASE_URL",
        "https://generativelanguage.googleapis.com/v1beta",
    );
    let advisor_timeout_secs = parse_u64("EFARMER_ADVISOR_TIMEOUT_SECS", "30")?;

    let advisor_temperature = parse_f32("EFARMER_ADVISOR_TEMPERATURE", "0.6")?;
    if !(0.0..=2.0).contains(&advisor_temperature) {
        return Err(invalid(
            "EFARMER_ADVISOR_TEMPERATURE",
            format!("{advisor_temperature} is outside 0.0..=2.0"),
        ));
    }

    let locator_default_limit = match lookup("EFARMER_LOCATOR_DEFAULT_LIMIT") {
        Ok(raw) => raw
            .parse::<usize>()
            .map_err(|e| invalid("EFARMER_LOCATOR_DEFAULT_LIMIT", e.to_string()))?,
        Err(_) => DEFAULT_LOCATOR_LIMIT,
    };
    if locator_default_limit == 0 {
        return Err(invalid(
            "EFARMER_LOCATOR_DEFAULT_LIMIT",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        facilities_path,
        advisor_api_key,
        advisor_model,
        advisor_base_url,
        advisor_timeout_secs,
        advisor_temperature,
        locator_default_limit,
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

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
