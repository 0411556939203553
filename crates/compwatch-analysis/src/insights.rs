//! Rule-based insight synthesis over the aggregates.
//!
//! Every finding, alert and recommendation is produced by one entry of
//! [`INSIGHT_RULES`]: a fixed condition over [`InsightInputs`] paired with
//! the message it emits. Rules are evaluated in table order, so the output
//! is reproducible for identical aggregates.

use compwatch_core::RegionLabel;
use serde::Serialize;

use crate::analyzer::{mean, percent_of, CompetitorAnalyzer};
use crate::types::{BrandRankRow, CitySummaryRow, OverviewStats, RegionStatsRow};

/// A store with at least this many new competitors is high risk.
pub const HIGH_RISK_NEW_COMPETITORS: u32 = 3;
/// A city is hot when its new competitors exceed the city mean by this factor.
pub const HOT_CITY_FACTOR: f64 = 1.5;
/// Top-3 brand share above which the market is reported as concentrated.
pub const CONCENTRATION_SHARE: f64 = 50.0;
/// Urban or county share above which that region is reported as dominant.
pub const REGION_DOMINANCE_SHARE: f64 = 60.0;
/// Ranked brands with at least this many occurrences are fast-expanding.
pub const FAST_BRAND_OCCURRENCES: usize = 5;
/// Affected-store ratio above which a regional strategy is recommended.
pub const AFFECTED_STORE_RATIO: f64 = 0.3;
/// Ranking depth the brand rules look at.
pub const INSIGHT_TOP_BRANDS: usize = 10;

const LISTED_NAMES: usize = 3;

/// The aggregates insight rules are evaluated over.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightInputs {
    pub overview: OverviewStats,
    pub city_summary: Vec<CitySummaryRow>,
    /// Top [`INSIGHT_TOP_BRANDS`] brands.
    pub brand_ranking: Vec<BrandRankRow>,
    pub region_analysis: Vec<RegionStatsRow>,
    /// Stores at or above [`HIGH_RISK_NEW_COMPETITORS`], most new
    /// competitors first; ties keep source order.
    pub high_risk_stores: Vec<(String, u32)>,
    /// New-competitor counters of stores with at least one.
    pub affected_counters: Vec<u32>,
}

impl InsightInputs {
    #[must_use]
    pub fn from_analyzer(analyzer: &CompetitorAnalyzer<'_>) -> Self {
        let stores = analyzer.stores();
        let mut high_risk_stores: Vec<(String, u32)> = stores
            .iter()
            .filter(|s| s.new_competitors >= HIGH_RISK_NEW_COMPETITORS)
            .map(|s| (s.store_name.clone(), s.new_competitors))
            .collect();
        high_risk_stores.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            overview: analyzer.overview(),
            city_summary: analyzer.city_summary(),
            brand_ranking: analyzer.brand_ranking(INSIGHT_TOP_BRANDS),
            region_analysis: analyzer.region_analysis(),
            high_risk_stores,
            affected_counters: stores
                .iter()
                .map(|s| s.new_competitors)
                .filter(|&n| n > 0)
                .collect(),
        }
    }

    fn region_new(&self, region: RegionLabel) -> Option<usize> {
        self.region_analysis
            .iter()
            .find(|r| r.region == region)
            .map(|r| r.new_competitors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Finding,
    RiskAlert,
    Recommendation,
}

/// One declarative rule: `evaluate` returns the message when the rule fires.
#[derive(Debug, Clone, Copy)]
pub struct InsightRule {
    pub id: &'static str,
    pub section: Section,
    pub evaluate: fn(&InsightInputs) -> Option<String>,
}

pub const INSIGHT_RULES: &[InsightRule] = &[
    InsightRule {
        id: "top_city",
        section: Section::Finding,
        evaluate: top_city,
    },
    InsightRule {
        id: "hot_cities",
        section: Section::Finding,
        evaluate: hot_cities,
    },
    InsightRule {
        id: "top_brand",
        section: Section::Finding,
        evaluate: top_brand,
    },
    InsightRule {
        id: "brand_concentration",
        section: Section::Finding,
        evaluate: brand_concentration,
    },
    InsightRule {
        id: "region_split",
        section: Section::Finding,
        evaluate: region_split,
    },
    InsightRule {
        id: "high_risk_count",
        section: Section::RiskAlert,
        evaluate: high_risk_count,
    },
    InsightRule {
        id: "high_risk_stores",
        section: Section::RiskAlert,
        evaluate: high_risk_stores,
    },
    InsightRule {
        id: "fast_brands",
        section: Section::RiskAlert,
        evaluate: fast_brands,
    },
    InsightRule {
        id: "field_research",
        section: Section::Recommendation,
        evaluate: field_research,
    },
    InsightRule {
        id: "regional_strategy",
        section: Section::Recommendation,
        evaluate: regional_strategy,
    },
    InsightRule {
        id: "study_top_brand",
        section: Section::Recommendation,
        evaluate: study_top_brand,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub rule: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InsightBundle {
    /// Empty when there are no stores.
    pub summary: String,
    pub findings: Vec<Insight>,
    pub risk_alerts: Vec<Insight>,
    pub recommendations: Vec<Insight>,
}

impl InsightBundle {
    /// Evaluates `rules` in order over `inputs`.
    #[must_use]
    pub fn evaluate(inputs: &InsightInputs, rules: &[InsightRule]) -> Self {
        let mut bundle = Self {
            summary: summary(inputs).unwrap_or_default(),
            ..Self::default()
        };
        for rule in rules {
            let Some(message) = (rule.evaluate)(inputs) else {
                continue;
            };
            let insight = Insight {
                rule: rule.id,
                message,
            };
            match rule.section {
                Section::Finding => bundle.findings.push(insight),
                Section::RiskAlert => bundle.risk_alerts.push(insight),
                Section::Recommendation => bundle.recommendations.push(insight),
            }
        }
        bundle
    }
}

impl CompetitorAnalyzer<'_> {
    /// Summary and every firing rule of [`INSIGHT_RULES`].
    #[must_use]
    pub fn insights(&self) -> InsightBundle {
        InsightBundle::evaluate(&InsightInputs::from_analyzer(self), INSIGHT_RULES)
    }
}

fn summary(inputs: &InsightInputs) -> Option<String> {
    let o = &inputs.overview;
    if o.total_stores == 0 {
        return None;
    }
    let affected = &inputs.affected_counters;
    let total: u64 = affected.iter().map(|&n| u64::from(n)).sum();
    let max = affected.iter().copied().max().unwrap_or(0);
    Some(format!(
        "{} of {} stores ({:.1}%) saw new competitors nearby: {} new competitors across {} brands; \
         affected stores average {:.1}, at most {}",
        o.stores_with_new_competitors,
        o.total_stores,
        percent_of(o.stores_with_new_competitors, o.total_stores),
        o.total_new_competitors,
        o.distinct_brands,
        mean(total, affected.len()),
        max,
    ))
}

fn top_city(inputs: &InsightInputs) -> Option<String> {
    let top = inputs.city_summary.first()?;
    Some(format!(
        "most contested city: {} with {} new competitors ({:.1}% of all)",
        top.city, top.new_competitors, top.share
    ))
}

fn hot_cities(inputs: &InsightInputs) -> Option<String> {
    let cities = &inputs.city_summary;
    if cities.len() <= 1 {
        return None;
    }
    let total: u64 = cities.iter().map(|c| c.new_competitors).sum();
    let threshold = mean(total, cities.len()) * HOT_CITY_FACTOR;
    #[allow(clippy::cast_precision_loss)]
    let hot: Vec<&str> = cities
        .iter()
        .filter(|c| c.new_competitors as f64 > threshold)
        .map(|c| c.city.as_str())
        .collect();
    (hot.len() > 1).then(|| {
        format!(
            "competition hot spots: {}",
            hot[..hot.len().min(LISTED_NAMES)].join(", ")
        )
    })
}

fn top_brand(inputs: &InsightInputs) -> Option<String> {
    let top = inputs.brand_ranking.first()?;
    Some(format!(
        "fastest expanding brand: {} with {} new stores ({:.1}%)",
        top.brand, top.count, top.share
    ))
}

fn brand_concentration(inputs: &InsightInputs) -> Option<String> {
    let ranking = &inputs.brand_ranking;
    if ranking.len() < 3 {
        return None;
    }
    let top3: f64 = ranking.iter().take(3).map(|b| b.share).sum();
    (top3 > CONCENTRATION_SHARE)
        .then(|| format!("brand concentration is high: top 3 brands hold {top3:.1}% of new competitors"))
}

fn region_split(inputs: &InsightInputs) -> Option<String> {
    let urban = inputs.region_new(RegionLabel::Urban)?;
    let county = inputs.region_new(RegionLabel::County)?;
    let total = urban + county;
    if total == 0 {
        return None;
    }
    let urban_share = percent_of(urban, total);
    let county_share = percent_of(county, total);
    Some(if urban_share > REGION_DOMINANCE_SHARE {
        format!("urban competition is rising: {urban_share:.1}% of new competitors are urban")
    } else if county_share > REGION_DOMINANCE_SHARE {
        format!("county competition is rising: {county_share:.1}% of new competitors are county-tier")
    } else {
        format!("competition is balanced: urban {urban_share:.1}% vs county {county_share:.1}%")
    })
}

fn high_risk_count(inputs: &InsightInputs) -> Option<String> {
    let n = inputs.high_risk_stores.len();
    (n > 0).then(|| {
        format!("{n} stores have {HIGH_RISK_NEW_COMPETITORS} or more new competitors nearby")
    })
}

fn high_risk_stores(inputs: &InsightInputs) -> Option<String> {
    if inputs.high_risk_stores.is_empty() {
        return None;
    }
    let names: Vec<&str> = inputs
        .high_risk_stores
        .iter()
        .take(LISTED_NAMES)
        .map(|(name, _)| name.as_str())
        .collect();
    Some(format!("stores to watch: {}", names.join(", ")))
}

fn fast_brands(inputs: &InsightInputs) -> Option<String> {
    let names: Vec<&str> = inputs
        .brand_ranking
        .iter()
        .filter(|b| b.count >= FAST_BRAND_OCCURRENCES)
        .take(LISTED_NAMES)
        .map(|b| b.brand.as_str())
        .collect();
    (!names.is_empty()).then(|| {
        format!(
            "brands expanding fast ({FAST_BRAND_OCCURRENCES}+ new stores): {}",
            names.join(", ")
        )
    })
}

fn has_new_competitors(inputs: &InsightInputs) -> bool {
    inputs.overview.total_new_competitors > 0
}

fn field_research(inputs: &InsightInputs) -> Option<String> {
    has_new_competitors(inputs).then(|| {
        "survey new competitors around affected stores: pricing, promotions and delivery radius"
            .to_string()
    })
}

fn regional_strategy(inputs: &InsightInputs) -> Option<String> {
    let o = &inputs.overview;
    let affected = percent_of(o.stores_with_new_competitors, o.total_stores);
    (has_new_competitors(inputs) && affected > AFFECTED_STORE_RATIO * 100.0).then(|| {
        format!("{affected:.1}% of stores are affected: plan a regional response rather than per-store fixes")
    })
}

fn study_top_brand(inputs: &InsightInputs) -> Option<String> {
    if !has_new_competitors(inputs) {
        return None;
    }
    let top = inputs.brand_ranking.first()?;
    Some(format!(
        "study how {} operates: catalog, subsidies and opening promotions",
        top.brand
    ))
}

#[cfg(test)]
#[path = "insights_test.rs"]
mod tests;
