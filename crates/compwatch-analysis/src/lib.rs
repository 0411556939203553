//! Aggregation and insight layer of the city competitor analysis.
//!
//! [`CompetitorAnalyzer`] borrows the long-format records (and optionally
//! the store summary) and computes every named result set on demand. The
//! [`pipeline`] module wires the ingest and region crates in front of it.

pub mod analyzer;
pub mod detail;
pub mod distribution;
pub mod insights;
pub mod keywords;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod test_support;

pub use analyzer::CompetitorAnalyzer;
pub use detail::{subsidy_midpoint, DetailFilter, DetailSort, SortKey};
pub use distribution::subsidy_bucket;
pub use insights::{Insight, InsightBundle, InsightInputs, InsightRule, Section, INSIGHT_RULES};
pub use keywords::KEYWORDS;
pub use pipeline::{load_dataset, AnalysisReport, Dataset};
pub use types::{
    BrandRankRow, BrandRegionRow, CatalogScale, CircleStatsRow, CityCount, CityNewCompetitorRow,
    CitySummaryRow, CrossTabRow, DetailRow, ExpansionTendency, KeywordCount, LabelShare,
    OverviewStats, RegionStatsRow, SubsidyBucket, SubsidyDistribution,
};
