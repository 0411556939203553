//! End-to-end pipeline: load, unpivot, classify, aggregate.

use std::path::Path;

use compwatch_core::{CompetitorRecord, StoreSummary};
use compwatch_ingest::{load, to_long, to_store_summary, LoadError, WideTable};
use compwatch_region::RegionClassifier;
use serde::Serialize;

use crate::analyzer::CompetitorAnalyzer;
use crate::insights::InsightBundle;
use crate::types::{
    BrandRankRow, BrandRegionRow, CatalogScale, CircleStatsRow, CityNewCompetitorRow,
    CitySummaryRow, CrossTabRow, KeywordCount, OverviewStats, RegionStatsRow,
    SubsidyDistribution,
};

/// Region-labelled long records and store summary of one workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<CompetitorRecord>,
    pub stores: Vec<StoreSummary>,
}

impl Dataset {
    /// Unpivots `table` and labels both views with `classifier`.
    #[must_use]
    pub fn from_table(table: &WideTable, classifier: &RegionClassifier) -> Self {
        let records = classifier.classify_batch(to_long(table));
        let stores = classifier.classify_batch(to_store_summary(table));
        Self { records, stores }
    }

    #[must_use]
    pub fn analyzer(&self) -> CompetitorAnalyzer<'_> {
        CompetitorAnalyzer::new(&self.records, Some(&self.stores))
    }

    /// Every aggregate the dashboard shows, with `top_n` ranked brands.
    #[must_use]
    pub fn report(&self, top_n: usize) -> AnalysisReport {
        let analyzer = self.analyzer();
        let report = AnalysisReport {
            overview: analyzer.overview(),
            city_summary: analyzer.city_summary(),
            brand_ranking: analyzer.brand_ranking(top_n),
            circle_analysis: analyzer.circle_analysis(),
            region_analysis: analyzer.region_analysis(),
            cross_tab: analyzer.circle_region_cross_tab(false),
            keywords: analyzer.brand_keywords(),
            catalog_scale: analyzer.catalog_scale(),
            subsidy_distribution: analyzer.subsidy_distribution(),
            brand_region_expansion: analyzer.brand_region_expansion(),
            new_competitors_by_city: analyzer.new_competitors_by_city(),
            insights: analyzer.insights(),
        };
        tracing::info!(
            stores = report.overview.total_stores,
            records = self.records.len(),
            cities = report.city_summary.len(),
            brands = report.overview.distinct_brands,
            "analysis report built"
        );
        report
    }
}

/// Loads the workbook at `path` and builds a [`Dataset`] from it.
///
/// # Errors
///
/// Returns [`LoadError`] when the file is missing, not a spreadsheet,
/// unreadable, or lacks required columns.
pub fn load_dataset(path: &Path, classifier: &RegionClassifier) -> Result<Dataset, LoadError> {
    let table = load(path)?;
    Ok(Dataset::from_table(&table, classifier))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub overview: OverviewStats,
    pub city_summary: Vec<CitySummaryRow>,
    pub brand_ranking: Vec<BrandRankRow>,
    pub circle_analysis: Vec<CircleStatsRow>,
    pub region_analysis: Vec<RegionStatsRow>,
    pub cross_tab: Vec<CrossTabRow>,
    pub keywords: Vec<KeywordCount>,
    pub catalog_scale: CatalogScale,
    pub subsidy_distribution: SubsidyDistribution,
    pub brand_region_expansion: Vec<BrandRegionRow>,
    pub new_competitors_by_city: Vec<CityNewCompetitorRow>,
    pub insights: InsightBundle,
}
