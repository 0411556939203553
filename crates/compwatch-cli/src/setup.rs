//! Process-wide setup: logging and the region classifier.

use std::path::Path;

use compwatch_core::{AppConfig, GeocoderKind, RegionLists};
use compwatch_region::{AmapGeocoder, RegionClassifier};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so JSON on stdout stays parseable. `RUST_LOG` wins
/// over the configured level.
///
/// # Errors
///
/// Returns an error if the configured level is not a valid filter.
pub(crate) fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Builds the classifier from the curated lists (`regions_override`, then
/// the configured file, then the built-in defaults) and the configured
/// geocoder.
///
/// # Errors
///
/// Returns an error if the region lists file cannot be read or validated,
/// or the geocoder client cannot be built.
pub(crate) fn build_classifier(
    config: &AppConfig,
    regions_override: Option<&Path>,
) -> anyhow::Result<RegionClassifier> {
    let lists = match regions_override.or(config.regions_path.as_deref()) {
        Some(path) => {
            let lists = compwatch_core::load_region_lists(path)?;
            tracing::info!(path = %path.display(), "loaded region lists");
            lists
        }
        None => RegionLists::default(),
    };
    let classifier = RegionClassifier::new(lists);

    match (config.geocoder, config.amap_api_key.as_deref()) {
        (GeocoderKind::Amap, Some(key)) => {
            let geocoder = AmapGeocoder::with_base_url(
                key,
                config.geocoder_timeout_secs,
                &config.geocoder_base_url,
            )
            .map_err(|e| anyhow::anyhow!("failed to build AMap geocoder: {e}"))?;
            tracing::info!(base_url = %config.geocoder_base_url, "geocoder enabled");
            Ok(classifier.with_geocoder(Box::new(geocoder)))
        }
        _ => Ok(classifier),
    }
}
