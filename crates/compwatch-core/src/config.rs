use crate::app_config::{AppConfig, GeocoderKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the selected geocoder is
/// missing its credentials.
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
/// Returns `ConfigError` if a value is invalid or the selected geocoder is
/// missing its credentials.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
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

    let log_level = or_default("COMPWATCH_LOG_LEVEL", "info");
    let regions_path = lookup("COMPWATCH_REGIONS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let geocoder = parse_geocoder_kind(&or_default("COMPWATCH_GEOCODER", "none"))?;
    let amap_api_key = lookup("COMPWATCH_AMAP_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    if geocoder == GeocoderKind::Amap && amap_api_key.is_none() {
        return Err(ConfigError::MissingEnvVar("COMPWATCH_AMAP_KEY".to_string()));
    }

    let geocoder_base_url = or_default("COMPWATCH_GEOCODER_BASE_URL", "https://restapi.amap.com/");
    let geocoder_timeout_secs = parse_u64("COMPWATCH_GEOCODER_TIMEOUT_SECS", "3")?;

    let top_brands = parse_usize("COMPWATCH_TOP_BRANDS", "10")?;
    if top_brands == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "COMPWATCH_TOP_BRANDS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        regions_path,
        geocoder,
        amap_api_key,
        geocoder_base_url,
        geocoder_timeout_secs,
        top_brands,
    })
}

/// Parse the `COMPWATCH_GEOCODER` value.
///
/// Matching is case-insensitive; an empty value means no geocoder.
fn parse_geocoder_kind(s: &str) -> Result<GeocoderKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "off" => Ok(GeocoderKind::None),
        "amap" => Ok(GeocoderKind::Amap),
        other => Err(ConfigError::InvalidEnvVar {
            var: "COMPWATCH_GEOCODER".to_string(),
            reason: format!("unknown geocoder '{other}'; expected 'none' or 'amap'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
