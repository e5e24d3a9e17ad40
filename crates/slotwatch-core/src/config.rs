use reqwest::Url;

use crate::app_config::{AppConfig, DEFAULT_PAGE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to their defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_positive = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<u64>()
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

    let page_url = parse_http_url(
        "SLOTWATCH_PAGE_URL",
        &or_default("SLOTWATCH_PAGE_URL", DEFAULT_PAGE_URL),
    )?;
    let log_level = or_default("SLOTWATCH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_positive("SLOTWATCH_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("SLOTWATCH_USER_AGENT", "slotwatch/0.1 (appointment-monitor)");

    let notify_timeout_secs = parse_positive("SLOTWATCH_NOTIFY_TIMEOUT_SECS", "10")?;
    let notify_timeout_secs =
        u32::try_from(notify_timeout_secs).map_err(|e| ConfigError::InvalidEnvVar {
            var: "SLOTWATCH_NOTIFY_TIMEOUT_SECS".to_string(),
            reason: e.to_string(),
        })?;

    let webhook_url = match lookup("SLOTWATCH_WEBHOOK_URL") {
        Ok(raw) if !raw.trim().is_empty() => {
            Some(parse_http_url("SLOTWATCH_WEBHOOK_URL", &raw)?)
        }
        _ => None,
    };

    Ok(AppConfig {
        page_url,
        log_level,
        request_timeout_secs,
        user_agent,
        notify_timeout_secs,
        webhook_url,
    })
}

/// Accepts absolute `http://` or `https://` URLs with a host.
fn parse_http_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };
    let url = Url::parse(trimmed).map_err(|e| invalid(format!("{e}: \"{trimmed}\"")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "expected an http(s) URL, got scheme \"{}\"",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("URL has no host: \"{trimmed}\"")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
