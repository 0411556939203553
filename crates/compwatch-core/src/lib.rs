//! Shared domain types and configuration for the competitor-watch workspace.
//!
//! Holds the long-format [`CompetitorRecord`] and per-store [`StoreSummary`]
//! produced by the ingest crate, the [`RegionLabel`] and
//! [`BusinessCircleType`] enums every aggregate keys off, the curated region
//! lists used by the classifier, and the env-driven [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod records;
pub mod regions;

pub use app_config::{AppConfig, GeocoderKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{BusinessCircleType, CompetitorRecord, RegionLabel, Regional, StoreSummary};
pub use regions::{load_region_lists, RegionLists};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read region lists file {path}: {source}")]
    RegionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse region lists file: {0}")]
    RegionsFileParse(#[from] serde_yaml::Error),

    #[error("region lists validation failed: {0}")]
    Validation(String),
}
