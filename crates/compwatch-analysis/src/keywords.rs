//! Keyword frequency over the free-text brand-traits field.

use crate::analyzer::CompetitorAnalyzer;
use crate::types::KeywordCount;

/// Promotion and operations terms looked for in brand traits.
pub const KEYWORDS: &[&str] = &[
    "低起送", "低门槛", "新客", "立减", "神券", "神价", "满减", "商补", "补贴", "折扣", "爆品",
    "活动", "配送", "免配", "开业", "收货", "营销", "日均", "单量",
];

impl CompetitorAnalyzer<'_> {
    /// Number of records whose brand traits mention each keyword, most
    /// frequent first. A record counts once per keyword it contains and may
    /// count toward several keywords. Keywords never seen are omitted; ties
    /// keep vocabulary order.
    #[must_use]
    pub fn brand_keywords(&self) -> Vec<KeywordCount> {
        let mut counts: Vec<KeywordCount> = KEYWORDS
            .iter()
            .map(|&keyword| KeywordCount { keyword, count: 0 })
            .collect();

        for text in self.records().iter().filter_map(|r| r.brand_traits.as_deref()) {
            for entry in &mut counts {
                if text.contains(entry.keyword) {
                    entry.count += 1;
                }
            }
        }

        counts.retain(|c| c.count > 0);
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}
