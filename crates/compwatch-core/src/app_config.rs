use std::path::PathBuf;

/// Which address-resolution backend feeds the classifier's geocoder layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocoderKind {
    /// No geocoder; the classifier skips its address-resolution layer.
    None,
    /// AMap (Gaode) REST geocoding API.
    Amap,
}

impl std::fmt::Display for GeocoderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocoderKind::None => write!(f, "none"),
            GeocoderKind::Amap => write!(f, "amap"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Optional YAML override for the curated county/district lists.
    pub regions_path: Option<PathBuf>,
    pub geocoder: GeocoderKind,
    pub amap_api_key: Option<String>,
    pub geocoder_base_url: String,
    pub geocoder_timeout_secs: u64,
    /// Default `N` for the brand ranking.
    pub top_brands: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("regions_path", &self.regions_path)
            .field("geocoder", &self.geocoder)
            .field(
                "amap_api_key",
                &self.amap_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("top_brands", &self.top_brands)
            .finish()
    }
}
