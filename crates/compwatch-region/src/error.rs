use thiserror::Error;

/// Errors from a geocoding backend. These never escape
/// [`crate::RegionClassifier::classify`]; a failed lookup is treated as
/// "no verdict".
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The geocoding API answered with a non-success status.
    #[error("geocoder API error: {0}")]
    Api(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
