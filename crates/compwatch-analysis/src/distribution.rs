//! Dashboard distributions beyond the core aggregates.

use std::collections::HashSet;

use compwatch_core::{BusinessCircleType, RegionLabel};

use crate::analyzer::{group_by, mean, non_blank, percent_of, CompetitorAnalyzer};
use crate::types::{
    BrandRegionRow, CatalogScale, CityCount, CityNewCompetitorRow, ExpansionTendency, LabelShare,
    OverviewStats, SubsidyBucket, SubsidyDistribution,
};

const SMALL_CATALOG_MAX: f64 = 3000.0;
const LARGE_CATALOG_MIN: f64 = 6000.0;
const TENDENCY_SHARE: f64 = 60.0;

impl CompetitorAnalyzer<'_> {
    /// Headline totals plus region and circle distributions of the
    /// competitor records.
    #[must_use]
    pub fn overview(&self) -> OverviewStats {
        let records = self.records();
        let stores = self.stores();

        let total_nearby_competitors = stores.iter().map(|s| u64::from(s.nearby_competitors)).sum();
        let (total_new_competitors, stores_with_new_competitors) = if self.has_store_summary() {
            (
                stores.iter().map(|s| u64::from(s.new_competitors)).sum(),
                stores.iter().filter(|s| s.new_competitors > 0).count(),
            )
        } else {
            // Every store in the long table has at least one new competitor.
            (records.len() as u64, stores.len())
        };

        let distinct_brands = records
            .iter()
            .map(|r| r.competitor_name.as_str())
            .collect::<HashSet<_>>()
            .len();
        let distinct_cities = records
            .iter()
            .filter_map(|r| non_blank(&r.city))
            .collect::<HashSet<_>>()
            .len();

        let region_distribution = label_shares(&RegionLabel::ALL, |label| {
            records
                .iter()
                .filter(|r| r.region.unwrap_or_default() == label)
                .count()
        });
        let circle_distribution = label_shares(&BusinessCircleType::ALL, |label| {
            records
                .iter()
                .filter(|r| r.circle_type == Some(label))
                .count()
        });

        OverviewStats {
            total_stores: stores.len(),
            total_nearby_competitors,
            total_new_competitors,
            stores_with_new_competitors,
            distinct_brands,
            distinct_cities,
            region_distribution,
            circle_distribution,
        }
    }

    /// Occurrences of `brand` (exact competitor name) per city, most first.
    #[must_use]
    pub fn brand_city_distribution(&self, brand: &str) -> Vec<CityCount> {
        let mut rows: Vec<CityCount> = group_by(
            self.records().iter().filter(|r| r.competitor_name == brand),
            |r| non_blank(&r.city),
        )
        .into_iter()
        .map(|(city, group)| CityCount {
            city,
            count: group.len(),
        })
        .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    #[must_use]
    pub fn catalog_scale(&self) -> CatalogScale {
        let mut scale = CatalogScale::default();
        for size in self.records().iter().filter_map(|r| r.catalog_size) {
            if size < SMALL_CATALOG_MAX {
                scale.small += 1;
            } else if size <= LARGE_CATALOG_MIN {
                scale.medium += 1;
            } else {
                scale.large += 1;
            }
        }
        scale
    }

    /// Records per subsidy bucket; see [`subsidy_bucket`].
    #[must_use]
    pub fn subsidy_distribution(&self) -> SubsidyDistribution {
        let mut distribution = SubsidyDistribution::default();
        for record in self.records() {
            distribution.add(subsidy_bucket(record.subsidy_rate.as_deref()));
        }
        distribution
    }

    /// Urban versus county presence per brand, largest brands first.
    #[must_use]
    pub fn brand_region_expansion(&self) -> Vec<BrandRegionRow> {
        let mut rows: Vec<BrandRegionRow> =
            group_by(self.records(), |r| Some(r.competitor_name.clone()))
                .into_iter()
                .map(|(brand, group)| {
                    let urban = group
                        .iter()
                        .filter(|r| r.region.unwrap_or_default() == RegionLabel::Urban)
                        .count();
                    let total = group.len();
                    let county = total - urban;
                    let urban_share = percent_of(urban, total);
                    let county_share = percent_of(county, total);
                    BrandRegionRow {
                        brand,
                        urban,
                        county,
                        total,
                        urban_share,
                        county_share,
                        tendency: tendency(urban_share, county_share),
                    }
                })
                .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows
    }

    /// Store-level new-competitor statistics per city, by total descending.
    #[must_use]
    pub fn new_competitors_by_city(&self) -> Vec<CityNewCompetitorRow> {
        let stores = self.stores();
        let mut rows: Vec<CityNewCompetitorRow> = group_by(stores.iter(), |s| non_blank(&s.city))
            .into_iter()
            .map(|(city, group)| {
                let new_competitors: u64 = group.iter().map(|s| u64::from(s.new_competitors)).sum();
                let affected = group.iter().filter(|s| s.new_competitors > 0).count();
                CityNewCompetitorRow {
                    city,
                    store_count: group.len(),
                    stores_with_new_competitors: affected,
                    new_competitors,
                    mean_new_competitors: mean(new_competitors, group.len()),
                    affected_share: percent_of(affected, group.len()),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.new_competitors.cmp(&a.new_competitors));
        rows
    }
}

/// Bucket for a subsidy-rate cell. Bounds are matched as substrings in the
/// order 10%, 20%, 30%; blank, `无`, `-`, `nan` and unrecognised values are
/// [`SubsidyBucket::None`].
#[must_use]
pub fn subsidy_bucket(rate: Option<&str>) -> SubsidyBucket {
    let Some(rate) = rate else {
        return SubsidyBucket::None;
    };
    let value = rate.trim().to_lowercase();
    if matches!(value.as_str(), "" | "nan" | "无" | "-") {
        SubsidyBucket::None
    } else if value.contains("10%") || value.contains("10-20") {
        SubsidyBucket::From10To20
    } else if value.contains("20%") || value.contains("20-30") {
        SubsidyBucket::From20To30
    } else if value.contains("30%") || value.contains(">30") {
        SubsidyBucket::Over30
    } else {
        SubsidyBucket::None
    }
}

fn tendency(urban_share: f64, county_share: f64) -> ExpansionTendency {
    if urban_share > TENDENCY_SHARE {
        ExpansionTendency::UrbanFocused
    } else if county_share > TENDENCY_SHARE {
        ExpansionTendency::CountyFocused
    } else {
        ExpansionTendency::Balanced
    }
}

fn label_shares<T: Copy>(labels: &[T], mut count: impl FnMut(T) -> usize) -> Vec<LabelShare<T>> {
    let counts: Vec<(T, usize)> = labels.iter().map(|&label| (label, count(label))).collect();
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    counts
        .into_iter()
        .map(|(label, count)| LabelShare {
            label,
            count,
            share: percent_of(count, total),
        })
        .collect()
}

#[cfg(test)]
#[path = "distribution_test.rs"]
mod tests;
