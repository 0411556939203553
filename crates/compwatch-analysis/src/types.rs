//! Result rows produced by [`crate::CompetitorAnalyzer`].
//!
//! Field names are the stable contract consumed by the presentation layer.
//! Shares are percentages in `[0, 100]` and are not rounded.

use compwatch_core::{BusinessCircleType, RegionLabel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummaryRow {
    pub city: String,
    pub store_count: usize,
    pub nearby_competitors: u64,
    pub new_competitors: u64,
    /// This city's share of the grand-total new competitors.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandRankRow {
    pub brand: String,
    pub count: usize,
    /// Share of all competitor records, not only the ranked ones.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleStatsRow {
    pub circle_type: BusinessCircleType,
    pub store_count: usize,
    pub mean_nearby_competitors: f64,
    pub mean_new_competitors: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStatsRow {
    pub region: RegionLabel,
    /// Stores in this region, from the store-level source.
    pub store_count: usize,
    /// Sum of the stores' nearby-competitor counters.
    pub nearby_competitors: u64,
    /// Competitor records in this region, from the long table.
    pub new_competitors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabRow {
    pub circle_type: BusinessCircleType,
    pub region: RegionLabel,
    pub store_count: usize,
    pub mean_nearby_competitors: f64,
    pub mean_new_competitors: f64,
}

/// One competitor record as shown in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub store_name: String,
    pub city: String,
    pub circle_type: Option<BusinessCircleType>,
    pub region: Option<RegionLabel>,
    pub competitor_name: String,
    pub brand_traits: Option<String>,
    pub catalog_size: Option<f64>,
    pub subsidy_rate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShare<T> {
    pub label: T,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_stores: usize,
    pub total_nearby_competitors: u64,
    pub total_new_competitors: u64,
    pub stores_with_new_competitors: usize,
    pub distinct_brands: usize,
    pub distinct_cities: usize,
    /// Competitor records per region, every label present.
    pub region_distribution: Vec<LabelShare<RegionLabel>>,
    /// Competitor records per circle type, every type present.
    pub circle_distribution: Vec<LabelShare<BusinessCircleType>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

/// Competitors by catalog size: small `< 3000`, medium `3000..=6000`,
/// large `> 6000`. Records without a catalog size are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogScale {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsidyBucket {
    None,
    #[serde(rename = "10%-20%")]
    From10To20,
    #[serde(rename = "20%-30%")]
    From20To30,
    #[serde(rename = ">30%")]
    Over30,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubsidyDistribution {
    pub none: usize,
    #[serde(rename = "10%-20%")]
    pub from_10_to_20: usize,
    #[serde(rename = "20%-30%")]
    pub from_20_to_30: usize,
    #[serde(rename = ">30%")]
    pub over_30: usize,
}

impl SubsidyDistribution {
    pub(crate) fn add(&mut self, bucket: SubsidyBucket) {
        match bucket {
            SubsidyBucket::None => self.none += 1,
            SubsidyBucket::From10To20 => self.from_10_to_20 += 1,
            SubsidyBucket::From20To30 => self.from_20_to_30 += 1,
            SubsidyBucket::Over30 => self.over_30 += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.none + self.from_10_to_20 + self.from_20_to_30 + self.over_30
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionTendency {
    UrbanFocused,
    CountyFocused,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandRegionRow {
    pub brand: String,
    pub urban: usize,
    pub county: usize,
    pub total: usize,
    pub urban_share: f64,
    pub county_share: f64,
    pub tendency: ExpansionTendency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityNewCompetitorRow {
    pub city: String,
    pub store_count: usize,
    pub stores_with_new_competitors: usize,
    pub new_competitors: u64,
    pub mean_new_competitors: f64,
    /// Share of this city's stores with at least one new competitor.
    pub affected_share: f64,
}
