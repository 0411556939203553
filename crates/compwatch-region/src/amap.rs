//! Blocking HTTP client for the AMap geocoding API.
//!
//! Only the `v3/geocode/geo` endpoint is used. The response envelope's
//! `"status"` field is checked and non-success answers surface as
//! [`GeocodeError::Api`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;

use crate::error::GeocodeError;
use crate::geocoder::Geocoder;

const DEFAULT_BASE_URL: &str = "https://restapi.amap.com/";
const GEOCODE_PATH: &str = "v3/geocode/geo";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    geocodes: Vec<GeocodeEntry>,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    /// A string, or `[]` when AMap has no district for the match.
    #[serde(default)]
    district: serde_json::Value,
}

/// Geocoder backed by the AMap REST API.
///
/// Use [`AmapGeocoder::new`] for production or
/// [`AmapGeocoder::with_base_url`] to point at a mock server in tests.
pub struct AmapGeocoder {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl AmapGeocoder {
    /// Creates a geocoder pointed at the production AMap API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying client cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a geocoder with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying client cannot be
    /// constructed, or [`GeocodeError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent("compwatch/0.1 (region-classification)")
            .build()?;

        // Exactly one trailing slash so joining the endpoint path appends
        // rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GeocodeError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    fn build_url(&self, address: &str, city: Option<&str>) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join(GEOCODE_PATH)
            .map_err(|e| GeocodeError::Api(format!("invalid endpoint URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("address", address);
            if let Some(city) = city.filter(|c| !c.trim().is_empty()) {
                pairs.append_pair("city", city);
            }
        }
        Ok(url)
    }
}

impl Geocoder for AmapGeocoder {
    fn resolve_area(
        &self,
        address: &str,
        city: Option<&str>,
    ) -> Result<Option<String>, GeocodeError> {
        let url = self.build_url(address, city)?;
        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .text()?;

        let response: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        if response.status != "1" {
            return Err(GeocodeError::Api(response.info));
        }

        Ok(response
            .geocodes
            .into_iter()
            .next()
            .and_then(|entry| entry.district.as_str().map(str::trim).map(str::to_owned))
            .filter(|district| !district.is_empty()))
    }
}
