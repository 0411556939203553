//! Filterable, sortable competitor detail view.

use std::cmp::Ordering;
use std::sync::LazyLock;

use compwatch_core::{BusinessCircleType, CompetitorRecord, RegionLabel};
use regex::Regex;

use crate::analyzer::CompetitorAnalyzer;
use crate::types::DetailRow;

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digits regex"));

/// Conjunctive filters over competitor records. `None` and blank strings
/// match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFilter {
    /// Exact city match.
    pub city: Option<String>,
    pub circle_type: Option<BusinessCircleType>,
    pub region: Option<RegionLabel>,
    /// Case-insensitive substring of the competitor name.
    pub brand: Option<String>,
}

impl DetailFilter {
    #[must_use]
    pub fn matches(&self, record: &CompetitorRecord) -> bool {
        if let Some(city) = active(self.city.as_deref()) {
            if record.city != city {
                return false;
            }
        }
        if let Some(circle_type) = self.circle_type {
            if record.circle_type != Some(circle_type) {
                return false;
            }
        }
        if let Some(region) = self.region {
            if record.region.unwrap_or_default() != region {
                return false;
            }
        }
        if let Some(brand) = active(self.brand.as_deref()) {
            if !record
                .competitor_name
                .to_lowercase()
                .contains(&brand.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CatalogSize,
    /// Orders by the bucket's numeric midpoint; see [`subsidy_midpoint`].
    SubsidyRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailSort {
    pub key: SortKey,
    pub ascending: bool,
}

/// Sort value for a subsidy-rate bucket: the mean of every integer in the
/// string (`"10%-20%"` → 15). Missing or digit-free values are `0.0`.
///
/// This is an ordering key only and deliberately ignores bucket bounds.
#[must_use]
pub fn subsidy_midpoint(rate: Option<&str>) -> f64 {
    let Some(rate) = rate else { return 0.0 };
    let values: Vec<f64> = DIGITS_RE
        .find_iter(rate)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    values.iter().sum::<f64>() / n
}

impl CompetitorAnalyzer<'_> {
    /// Records matching every active filter, optionally sorted. The sort is
    /// stable; records without a catalog size sort last in either direction.
    #[must_use]
    pub fn competitor_details(
        &self,
        filter: &DetailFilter,
        sort: Option<DetailSort>,
    ) -> Vec<DetailRow> {
        let mut matched: Vec<&CompetitorRecord> = self
            .records()
            .iter()
            .filter(|r| filter.matches(r))
            .collect();

        if let Some(sort) = sort {
            matched.sort_by(|a, b| compare(a, b, sort));
        }

        matched.into_iter().map(detail_row).collect()
    }
}

fn compare(a: &CompetitorRecord, b: &CompetitorRecord, sort: DetailSort) -> Ordering {
    let directed = |ord: Ordering| if sort.ascending { ord } else { ord.reverse() };
    match sort.key {
        SortKey::CatalogSize => match (a.catalog_size, b.catalog_size) {
            (Some(x), Some(y)) => directed(x.total_cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::SubsidyRate => {
            let x = subsidy_midpoint(a.subsidy_rate.as_deref());
            let y = subsidy_midpoint(b.subsidy_rate.as_deref());
            directed(x.total_cmp(&y))
        }
    }
}

fn detail_row(record: &CompetitorRecord) -> DetailRow {
    DetailRow {
        store_name: record.store_name.clone(),
        city: record.city.clone(),
        circle_type: record.circle_type,
        region: record.region,
        competitor_name: record.competitor_name.clone(),
        brand_traits: record.brand_traits.clone(),
        catalog_size: record.catalog_size,
        subsidy_rate: record.subsidy_rate.clone(),
    }
}
