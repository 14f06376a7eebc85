use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
/// Every variable is optional; the defaults reproduce the canonical run
/// (seed 42, 1200 posts, 8 blank texts, 6 blank impression counts).
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the values contradict
/// each other.
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
/// Returns `ConfigError` if a value cannot be parsed or the values contradict
/// each other.
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
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_num = |var: &str, default: &str| -> Result<u64, ConfigError> {
        parse_value(var, &or_default(var, default))
    };

    let parse_count = |var: &str, default: &str| -> Result<usize, ConfigError> {
        parse_value(var, &or_default(var, default))
    };

    let seed = parse_num("PULSE_SEED", "42")?;
    let post_count = parse_count("PULSE_POST_COUNT", "1200")?;
    let missing_text = parse_count("PULSE_MISSING_TEXT", "8")?;
    let missing_impressions = parse_count("PULSE_MISSING_IMPRESSIONS", "6")?;
    let window_days: u32 =
        parse_value("PULSE_WINDOW_DAYS", &or_default("PULSE_WINDOW_DAYS", "200"))?;
    let scatter_sample = parse_count("PULSE_SCATTER_SAMPLE", "400")?;
    let top_n = parse_count("PULSE_TOP_N", "3")?;
    let moving_average_days = parse_count("PULSE_MOVING_AVERAGE_DAYS", "7")?;
    let output_dir = PathBuf::from(or_default("PULSE_OUTPUT_DIR", "./output"));
    let log_level = or_default("PULSE_LOG_LEVEL", "info");

    let config = AppConfig {
        seed,
        post_count,
        missing_text,
        missing_impressions,
        window_days,
        scatter_sample,
        top_n,
        moving_average_days,
        output_dir,
        log_level,
    };
    validate(&config)?;
    Ok(config)
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.post_count == 0 {
        return Err(ConfigError::Inconsistent(
            "PULSE_POST_COUNT must be at least 1".to_string(),
        ));
    }
    if config.window_days == 0 {
        return Err(ConfigError::Inconsistent(
            "PULSE_WINDOW_DAYS must be at least 1".to_string(),
        ));
    }
    if config.top_n == 0 || config.moving_average_days == 0 {
        return Err(ConfigError::Inconsistent(
            "PULSE_TOP_N and PULSE_MOVING_AVERAGE_DAYS must be at least 1".to_string(),
        ));
    }
    for (var, count) in [
        ("PULSE_MISSING_TEXT", config.missing_text),
        ("PULSE_MISSING_IMPRESSIONS", config.missing_impressions),
    ] {
        if count > config.post_count {
            return Err(ConfigError::Inconsistent(format!(
                "{var}={count} exceeds PULSE_POST_COUNT={}",
                config.post_count
            )));
        }
    }
    Ok(())
}
