//! Urban/county classification of stores.
//!
//! [`RegionClassifier`] runs a fixed priority cascade over curated name
//! lists, an optional [`Geocoder`] hint, and keyword heuristics, falling
//! back to [`RegionLabel::County`](compwatch_core::RegionLabel::County).
//! [`AmapGeocoder`] is the HTTP-backed hint; [`NoopGeocoder`] is the default.

pub mod amap;
pub mod classifier;
pub mod error;
pub mod geocoder;

pub use amap::AmapGeocoder;
pub use classifier::RegionClassifier;
pub use error::GeocodeError;
pub use geocoder::{Geocoder, NoopGeocoder};
