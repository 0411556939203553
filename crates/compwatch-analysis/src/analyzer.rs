//! Core aggregates over the long-format records.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use compwatch_core::{BusinessCircleType, CompetitorRecord, RegionLabel, StoreSummary};

use crate::types::{BrandRankRow, CircleStatsRow, CitySummaryRow, CrossTabRow, RegionStatsRow};

/// Read-only analysis over one loaded dataset.
///
/// Every method is a pure function of the records (and store summary)
/// supplied at construction; calls may be repeated in any order. Empty
/// input yields empty results.
#[derive(Debug, Clone, Copy)]
pub struct CompetitorAnalyzer<'a> {
    records: &'a [CompetitorRecord],
    stores: Option<&'a [StoreSummary]>,
}

impl<'a> CompetitorAnalyzer<'a> {
    /// Store-level statistics come from `stores` when given; otherwise the
    /// long records are deduplicated by store name (first occurrence wins).
    #[must_use]
    pub fn new(records: &'a [CompetitorRecord], stores: Option<&'a [StoreSummary]>) -> Self {
        tracing::debug!(
            records = records.len(),
            stores = stores.map(<[StoreSummary]>::len),
            "analyzer constructed"
        );
        Self { records, stores }
    }

    #[must_use]
    pub fn records(&self) -> &'a [CompetitorRecord] {
        self.records
    }

    pub(crate) fn has_store_summary(&self) -> bool {
        self.stores.is_some()
    }

    /// The store-level rows statistics are computed over.
    pub(crate) fn stores(&self) -> Cow<'a, [StoreSummary]> {
        match self.stores {
            Some(stores) => Cow::Borrowed(stores),
            None => {
                let mut seen = HashSet::new();
                Cow::Owned(
                    self.records
                        .iter()
                        .filter(|r| seen.insert(r.store_name.as_str()))
                        .map(CompetitorRecord::store_summary)
                        .collect(),
                )
            }
        }
    }

    /// New-competitor totals per city, sorted by new competitors descending.
    ///
    /// With a store summary the counters are summed per city; otherwise each
    /// competitor record counts once. Stores with a blank city are skipped.
    #[must_use]
    pub fn city_summary(&self) -> Vec<CitySummaryRow> {
        if self.records.is_empty() {
            return Vec::new();
        }

        let mut rows: Vec<CitySummaryRow> = if let Some(stores) = self.stores {
            group_by(stores, |s| non_blank(&s.city))
                .into_iter()
                .map(|(city, group)| CitySummaryRow {
                    city,
                    store_count: group.len(),
                    nearby_competitors: group.iter().map(|s| u64::from(s.nearby_competitors)).sum(),
                    new_competitors: group.iter().map(|s| u64::from(s.new_competitors)).sum(),
                    share: 0.0,
                })
                .collect()
        } else {
            let stores = self.stores();
            let nearby_by_city: HashMap<String, u64> =
                group_by(stores.iter(), |s| non_blank(&s.city))
                    .into_iter()
                    .map(|(city, group)| {
                        let total = group.iter().map(|s| u64::from(s.nearby_competitors)).sum();
                        (city, total)
                    })
                    .collect();

            group_by(self.records, |r| non_blank(&r.city))
                .into_iter()
                .map(|(city, group)| {
                    let distinct: HashSet<&str> =
                        group.iter().map(|r| r.store_name.as_str()).collect();
                    CitySummaryRow {
                        nearby_competitors: nearby_by_city.get(city.as_str()).copied().unwrap_or(0),
                        store_count: distinct.len(),
                        new_competitors: group.len() as u64,
                        share: 0.0,
                        city,
                    }
                })
                .collect()
        };

        let total: u64 = rows.iter().map(|r| r.new_competitors).sum();
        for row in &mut rows {
            row.share = percent(row.new_competitors, total);
        }
        rows.sort_by(|a, b| b.new_competitors.cmp(&a.new_competitors));
        rows
    }

    /// Competitor names by occurrence, most frequent first, truncated to
    /// `top_n`. Ties keep first-appearance order.
    #[must_use]
    pub fn brand_ranking(&self, top_n: usize) -> Vec<BrandRankRow> {
        let total = self.records.len();
        let mut rows: Vec<BrandRankRow> = group_by(self.records, |r| Some(r.competitor_name.clone()))
            .into_iter()
            .map(|(brand, group)| BrandRankRow {
                share: percent_of(group.len(), total),
                count: group.len(),
                brand,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows.truncate(top_n);
        rows
    }

    /// Store counts and mean counters per circle type, ordered
    /// strong, medium, weak. Only types present in the data appear.
    #[must_use]
    pub fn circle_analysis(&self) -> Vec<CircleStatsRow> {
        let stores = self.stores();
        let mut rows: Vec<CircleStatsRow> = group_by(stores.iter(), |s| s.circle_type)
            .into_iter()
            .map(|(circle_type, group)| {
                let (mean_nearby, mean_new) = counter_means(&group);
                CircleStatsRow {
                    circle_type,
                    store_count: group.len(),
                    mean_nearby_competitors: mean_nearby,
                    mean_new_competitors: mean_new,
                }
            })
            .collect();
        rows.sort_by_key(|r| r.circle_type);
        rows
    }

    /// Store counts per region joined with the number of competitor records
    /// in that region.
    ///
    /// Store counts come from the store-level source while new competitors
    /// are counted from the long records, so the two can disagree when the
    /// source counters and filled slots diverge. Regions absent from the
    /// store side are omitted; regions without records report zero.
    /// Unlabelled rows count as [`RegionLabel::County`].
    #[must_use]
    pub fn region_analysis(&self) -> Vec<RegionStatsRow> {
        let mut new_by_region: HashMap<RegionLabel, usize> = HashMap::new();
        for record in self.records {
            *new_by_region
                .entry(record.region.unwrap_or_default())
                .or_default() += 1;
        }

        let stores = self.stores();
        let mut rows: Vec<RegionStatsRow> =
            group_by(stores.iter(), |s| Some(s.region.unwrap_or_default()))
                .into_iter()
                .map(|(region, group)| RegionStatsRow {
                    region,
                    store_count: group.len(),
                    nearby_competitors: group.iter().map(|s| u64::from(s.nearby_competitors)).sum(),
                    new_competitors: new_by_region.get(&region).copied().unwrap_or(0),
                })
                .collect();
        rows.sort_by_key(|r| r.region);
        rows
    }

    /// Store counts and mean counters per (circle type, region) pair.
    ///
    /// Only combinations present in the data appear unless `dense` is set,
    /// in which case all six combinations are returned with absent ones
    /// zero-filled.
    #[must_use]
    pub fn circle_region_cross_tab(&self, dense: bool) -> Vec<CrossTabRow> {
        let stores = self.stores();
        let mut rows: Vec<CrossTabRow> = group_by(stores.iter(), |s| {
            s.circle_type
                .map(|circle| (circle, s.region.unwrap_or_default()))
        })
        .into_iter()
        .map(|((circle_type, region), group)| {
            let (mean_nearby, mean_new) = counter_means(&group);
            CrossTabRow {
                circle_type,
                region,
                store_count: group.len(),
                mean_nearby_competitors: mean_nearby,
                mean_new_competitors: mean_new,
            }
        })
        .collect();

        if dense {
            for circle_type in BusinessCircleType::ALL {
                for region in RegionLabel::ALL {
                    if !rows
                        .iter()
                        .any(|r| r.circle_type == circle_type && r.region == region)
                    {
                        rows.push(CrossTabRow {
                            circle_type,
                            region,
                            store_count: 0,
                            mean_nearby_competitors: 0.0,
                            mean_new_competitors: 0.0,
                        });
                    }
                }
            }
        }

        rows.sort_by_key(|r| (r.circle_type, r.region));
        rows
    }
}

/// Groups `items` by `key` in first-appearance order. Items whose key is
/// `None` are skipped.
pub(crate) fn group_by<'r, T, K, F>(
    items: impl IntoIterator<Item = &'r T>,
    mut key: F,
) -> Vec<(K, Vec<&'r T>)>
where
    T: 'r,
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'r T>)> = Vec::new();
    for item in items {
        let Some(k) = key(item) else { continue };
        match index.get(&k) {
            Some(&pos) => groups[pos].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| value.to_string())
}

/// `part / whole * 100`, or `0.0` when `whole` is zero.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(sum: u64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum as f64 / n as f64
    }
}

fn counter_means(stores: &[&StoreSummary]) -> (f64, f64) {
    let nearby: u64 = stores.iter().map(|s| u64::from(s.nearby_competitors)).sum();
    let new: u64 = stores.iter().map(|s| u64::from(s.new_competitors)).sum();
    (mean(nearby, stores.len()), mean(new, stores.len()))
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
