//! Long-format competitor records, per-store summaries, and the categorical
//! labels the analysis groups by.

use serde::{Deserialize, Serialize};

/// Pre-existing commercial-surroundings rating of a store.
///
/// Variant order is the display order: `Strong < Medium < Weak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCircleType {
    Strong,
    Medium,
    Weak,
}

impl BusinessCircleType {
    pub const ALL: [Self; 3] = [Self::Strong, Self::Medium, Self::Weak];

    /// Parse a spreadsheet cell value (`强`/`中`/`弱` or the English names,
    /// case-insensitive). Returns `None` for anything else.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "强" | "strong" => Some(Self::Strong),
            "中" | "medium" => Some(Self::Medium),
            "弱" | "weak" => Some(Self::Weak),
            _ => None,
        }
    }
}

impl std::fmt::Display for BusinessCircleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessCircleType::Strong => write!(f, "strong"),
            BusinessCircleType::Medium => write!(f, "medium"),
            BusinessCircleType::Weak => write!(f, "weak"),
        }
    }
}

/// Derived geographic tier of a store.
///
/// `County` is the default: ambiguous stores are treated as county-tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RegionLabel {
    Urban,
    #[default]
    County,
}

impl RegionLabel {
    pub const ALL: [Self; 2] = [Self::Urban, Self::County];

    /// Parse `市区`/`县城` or `urban`/`county` (case-insensitive).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "市区" | "urban" => Some(Self::Urban),
            "县城" | "county" => Some(Self::County),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionLabel::Urban => write!(f, "urban"),
            RegionLabel::County => write!(f, "county"),
        }
    }
}

/// One store's static fields, without competitor expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub store_name: String,
    pub city: String,
    pub operator: String,
    /// `None` when the source cell is blank or not a recognised rating.
    pub circle_type: Option<BusinessCircleType>,
    /// Competitors within the fixed radius.
    pub nearby_competitors: u32,
    /// Competitors newly observed within the trailing window.
    pub new_competitors: u32,
    /// Set by region classification; `None` until then.
    pub region: Option<RegionLabel>,
}

/// One observed competitor next to one store (long format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub store_name: String,
    pub city: String,
    pub operator: String,
    pub circle_type: Option<BusinessCircleType>,
    pub region: Option<RegionLabel>,
    pub nearby_competitors: u32,
    pub new_competitors: u32,
    pub competitor_name: String,
    pub brand_traits: Option<String>,
    pub catalog_size: Option<f64>,
    pub subsidy_rate: Option<String>,
    /// 1-based slot index within the source row.
    pub slot_seq: u32,
}

impl CompetitorRecord {
    /// The store-level fields this record was expanded from.
    #[must_use]
    pub fn store_summary(&self) -> StoreSummary {
        StoreSummary {
            store_name: self.store_name.clone(),
            city: self.city.clone(),
            operator: self.operator.clone(),
            circle_type: self.circle_type,
            nearby_competitors: self.nearby_competitors,
            new_competitors: self.new_competitors,
            region: self.region,
        }
    }
}

/// A row that can be enriched with a region label.
pub trait Regional {
    fn store_name(&self) -> &str;
    fn city(&self) -> &str;
    fn region(&self) -> Option<RegionLabel>;
    fn set_region(&mut self, region: RegionLabel);
}

impl Regional for StoreSummary {
    fn store_name(&self) -> &str {
        &self.store_name
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn region(&self) -> Option<RegionLabel> {
        self.region
    }

    fn set_region(&mut self, region: RegionLabel) {
        self.region = Some(region);
    }
}

impl Regional for CompetitorRecord {
    fn store_name(&self) -> &str {
        &self.store_name
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn region(&self) -> Option<RegionLabel> {
        self.region
    }

    fn set_region(&mut self, region: RegionLabel) {
        self.region = Some(region);
    }
}
