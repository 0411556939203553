//! Discovery of repeated competitor-slot column groups.
//!
//! Slot columns are not at fixed positions. Discovery runs in two passes:
//! first every anchor column (the competitor name) is located, then each
//! anchor's attribute columns are searched only between it and the next
//! anchor.

use crate::schema::{AttributeRole, ColumnSchema};
use crate::table::WideTable;

/// One competitor slot: the anchor column plus the attribute columns found
/// in its span. Indices refer to [`WideTable::headers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGroup {
    pub anchor: usize,
    pub anchor_header: String,
    pub brand_traits: Option<usize>,
    pub catalog_size: Option<usize>,
    pub subsidy_rate: Option<usize>,
}

impl SlotGroup {
    fn new(anchor: usize, anchor_header: &str) -> Self {
        Self {
            anchor,
            anchor_header: anchor_header.to_string(),
            brand_traits: None,
            catalog_size: None,
            subsidy_rate: None,
        }
    }

    fn assign(&mut self, role: AttributeRole, column: usize) {
        let slot = match role {
            AttributeRole::BrandTraits => &mut self.brand_traits,
            AttributeRole::CatalogSize => &mut self.catalog_size,
            AttributeRole::SubsidyRate => &mut self.subsidy_rate,
        };
        if slot.is_none() {
            *slot = Some(column);
        }
    }
}

#[must_use]
pub fn detect_slot_groups(table: &WideTable) -> Vec<SlotGroup> {
    detect_slot_groups_with(table, &ColumnSchema::default())
}

/// Slot groups of `table` in left-to-right anchor order.
///
/// A group whose span holds no recognisable attribute column is still
/// returned with all attribute indices `None`.
#[must_use]
pub fn detect_slot_groups_with(table: &WideTable, schema: &ColumnSchema) -> Vec<SlotGroup> {
    let headers = table.headers();

    let anchors: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| schema.is_slot_anchor(h))
        .map(|(idx, _)| idx)
        .collect();

    let mut groups = Vec::with_capacity(anchors.len());
    for (pos, &anchor) in anchors.iter().enumerate() {
        let end = anchors.get(pos + 1).copied().unwrap_or(headers.len());
        let mut group = SlotGroup::new(anchor, &headers[anchor]);

        for (column, header) in headers.iter().enumerate().take(end).skip(anchor + 1) {
            if let Some(role) = schema.attribute_role(header) {
                group.assign(role, column);
            }
        }
        groups.push(group);
    }

    tracing::info!(groups = groups.len(), "detected competitor slot groups");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> WideTable {
        WideTable::new(headers.iter().map(|s| (*s).to_string()).collect(), vec![])
    }

    const STATIC: [&str; 6] = [
        "门店名称",
        "城市",
        "运营",
        "商圈类型",
        "5km内竞对数量",
        "近15天5km内新增竞对数量",
    ];

    fn with_static(rest: &[&str]) -> WideTable {
        let mut headers: Vec<&str> = STATIC.to_vec();
        headers.extend_from_slice(rest);
        table(&headers)
    }

    #[test]
    fn groups_follow_anchor_order_with_suffixed_duplicates() {
        let t = with_static(&[
            "新增竞对1",
            "品牌特性",
            "sku数",
            "商补率",
            "新增竞对2",
            "品牌特性",
            "sku数",
            "商补率",
        ]);
        let groups = detect_slot_groups(&t);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].anchor, 6);
        assert_eq!(groups[0].brand_traits, Some(7));
        assert_eq!(groups[0].catalog_size, Some(8));
        assert_eq!(groups[0].subsidy_rate, Some(9));

        assert_eq!(groups[1].anchor_header, "新增竞对2");
        assert_eq!(groups[1].brand_traits, Some(11));
        assert_eq!(t.headers()[11], "品牌特性.1");
        assert_eq!(groups[1].subsidy_rate, Some(13));
    }

    #[test]
    fn attributes_do_not_leak_across_anchors() {
        let t = with_static(&["新增竞对", "新增竞对2", "品牌特性", "SKU数"]);
        let groups = detect_slot_groups(&t);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].brand_traits, None);
        assert_eq!(groups[0].catalog_size, None);
        assert_eq!(groups[1].brand_traits, Some(8));
        assert_eq!(groups[1].catalog_size, Some(9));
    }

    #[test]
    fn first_matching_column_wins_within_span() {
        let t = with_static(&["新增竞对1", "品牌特性", "备注", "品牌特性补充"]);
        let groups = detect_slot_groups(&t);
        assert_eq!(groups[0].brand_traits, Some(7));
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let t = with_static(&["新增竞对1", "开业日期", "备注"]);
        let groups = detect_slot_groups(&t);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].brand_traits, None);
        assert_eq!(groups[0].catalog_size, None);
        assert_eq!(groups[0].subsidy_rate, None);
    }

    #[test]
    fn no_anchors_yields_no_groups() {
        let t = with_static(&["品牌特性"]);
        assert!(detect_slot_groups(&t).is_empty());
    }
}
