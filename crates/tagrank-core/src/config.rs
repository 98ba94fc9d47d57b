use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_API_BASE_URL: &str = "https://i.instagram.com/api/v1/";
const DEFAULT_USER_AGENT: &str = "tagrank/0.1 (hashtag-ranking)";

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
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("TAGRANK_ENV", "development"))?;
    let log_level = or_default("TAGRANK_LOG_LEVEL", "info");

    let api_base_url = normalize_base_url(&or_default("TAGRANK_API_BASE_URL", DEFAULT_API_BASE_URL))?;
    let api_token = lookup("TAGRANK_API_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty());

    let request_timeout_secs = parse_u64("TAGRANK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TAGRANK_USER_AGENT", DEFAULT_USER_AGENT);

    let max_concurrent_tags = parse_usize("TAGRANK_MAX_CONCURRENT_TAGS", "1")?;
    if max_concurrent_tags == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TAGRANK_MAX_CONCURRENT_TAGS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let inter_request_delay_ms = parse_u64("TAGRANK_INTER_REQUEST_DELAY_MS", "0")?;

    let hashtags_path = lookup("TAGRANK_HASHTAGS_PATH").ok().map(PathBuf::from);
    let out_path = PathBuf::from(or_default("TAGRANK_OUT_PATH", "ranked_list.csv"));

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        api_token,
        request_timeout_secs,
        user_agent,
        max_concurrent_tags,
        inter_request_delay_ms,
        hashtags_path,
        out_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TAGRANK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Require an http(s) scheme and exactly one trailing slash, so that relative
/// endpoint paths join under the base instead of replacing its last segment.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "TAGRANK_API_BASE_URL".to_string(),
            reason: format!("'{trimmed}' is not an http(s) URL"),
        });
    }
    Ok(format!("{}/", trimmed.trim_end_matches('/')))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
