use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_geocoder_kind_none() {
    assert_eq!(parse_geocoder_kind("none").unwrap(), GeocoderKind::None);
    assert_eq!(parse_geocoder_kind("").unwrap(), GeocoderKind::None);
}

#[test]
fn parse_geocoder_kind_amap_is_case_insensitive() {
    assert_eq!(parse_geocoder_kind("AMap").unwrap(), GeocoderKind::Amap);
}

#[test]
fn parse_geocoder_kind_unknown_fails() {
    let err = parse_geocoder_kind("google").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "COMPWATCH_GEOCODER"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.regions_path.is_none());
    assert_eq!(cfg.geocoder, GeocoderKind::None);
    assert!(cfg.amap_api_key.is_none());
    assert_eq!(cfg.geocoder_base_url, "https://restapi.amap.com/");
    assert_eq!(cfg.geocoder_timeout_secs, 3);
    assert_eq!(cfg.top_brands, 10);
}

#[test]
fn build_app_config_amap_requires_key() {
    let mut map = HashMap::new();
    map.insert("COMPWATCH_GEOCODER", "amap");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "COMPWATCH_AMAP_KEY"),
        "expected MissingEnvVar(COMPWATCH_AMAP_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_amap_with_key() {
    let mut map = HashMap::new();
    map.insert("COMPWATCH_GEOCODER", "amap");
    map.insert("COMPWATCH_AMAP_KEY", "secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.geocoder, GeocoderKind::Amap);
    assert_eq!(cfg.amap_api_key.as_deref(), Some("secret-key"));
}

#[test]
fn build_app_config_regions_path_override() {
    let mut map = HashMap::new();
    map.insert("COMPWATCH_REGIONS_PATH", "./config/regions.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.regions_path.as_deref(),
        Some(std::path::Path::new("./config/regions.yaml"))
    );
}

#[test]
fn build_app_config_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("COMPWATCH_GEOCODER_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COMPWATCH_GEOCODER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(COMPWATCH_GEOCODER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_top_brands_override() {
    let mut map = HashMap::new();
    map.insert("COMPWATCH_TOP_BRANDS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.top_brands, 5);
}

#[test]
fn build_app_config_top_brands_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("COMPWATCH_TOP_BRANDS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COMPWATCH_TOP_BRANDS"),
        "expected InvalidEnvVar(COMPWATCH_TOP_BRANDS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("COMPWATCH_GEOCODER", "amap");
    map.insert("COMPWATCH_AMAP_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
