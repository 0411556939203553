//! Column naming contract for the competitor workbook.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::LoadError;
use crate::table::WideTable;

static SLOT_ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^新增竞对\d*$").expect("valid slot regex"));

/// Attribute a column inside a competitor slot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeRole {
    BrandTraits,
    CatalogSize,
    SubsidyRate,
}

/// Header names and matching rules the loader and parser rely on.
///
/// [`ColumnSchema::default`] describes the production workbook.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub store_name: String,
    pub city: String,
    pub operator: String,
    pub circle_type: String,
    pub nearby_count: String,
    pub new_count: String,
    /// Matches competitor-name anchor columns (`新增竞对`, `新增竞对2`, ...).
    pub slot_pattern: Regex,
    /// Case-insensitive substrings identifying each attribute role.
    pub brand_keywords: Vec<String>,
    pub catalog_keywords: Vec<String>,
    pub subsidy_keywords: Vec<String>,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            store_name: "门店名称".to_string(),
            city: "城市".to_string(),
            operator: "运营".to_string(),
            circle_type: "商圈类型".to_string(),
            nearby_count: "5km内竞对数量".to_string(),
            new_count: "近15天5km内新增竞对数量".to_string(),
            slot_pattern: SLOT_ANCHOR_RE.clone(),
            brand_keywords: vec!["品牌特性".to_string(), "brand".to_string()],
            catalog_keywords: vec!["sku".to_string(), "catalog".to_string()],
            subsidy_keywords: vec!["商补率".to_string(), "subsidy".to_string()],
        }
    }
}

impl ColumnSchema {
    /// The six static per-store columns, in workbook order.
    #[must_use]
    pub fn required_columns(&self) -> [&str; 6] {
        [
            &self.store_name,
            &self.city,
            &self.operator,
            &self.circle_type,
            &self.nearby_count,
            &self.new_count,
        ]
    }

    #[must_use]
    pub fn is_slot_anchor(&self, header: &str) -> bool {
        self.slot_pattern.is_match(header.trim())
    }

    /// Classify a column header inside a slot span. Roles are tried in the
    /// order brand traits, catalog size, subsidy rate.
    #[must_use]
    pub fn attribute_role(&self, header: &str) -> Option<AttributeRole> {
        let lower = header.to_lowercase();
        let matches = |keywords: &[String]| {
            keywords
                .iter()
                .any(|k| lower.contains(k.to_lowercase().as_str()))
        };

        if matches(&self.brand_keywords) {
            Some(AttributeRole::BrandTraits)
        } else if matches(&self.catalog_keywords) {
            Some(AttributeRole::CatalogSize)
        } else if matches(&self.subsidy_keywords) {
            Some(AttributeRole::SubsidyRate)
        } else {
            None
        }
    }

    /// Check that every required column and at least one slot anchor exist.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidSchema`] listing every missing requirement;
    /// an absent slot anchor is reported as a single entry.
    pub fn validate(&self, table: &WideTable) -> Result<(), LoadError> {
        let mut missing: Vec<String> = self
            .required_columns()
            .iter()
            .filter(|col| table.column_index(col).is_none())
            .map(|col| (*col).to_string())
            .collect();

        if !table.headers().iter().any(|h| self.is_slot_anchor(h)) {
            missing.push(format!(
                "competitor slot column matching {}",
                self.slot_pattern.as_str()
            ));
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoadError::InvalidSchema { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> WideTable {
        WideTable::new(headers.iter().map(|s| (*s).to_string()).collect(), vec![])
    }

    #[test]
    fn anchors_with_and_without_suffix() {
        let schema = ColumnSchema::default();
        assert!(schema.is_slot_anchor("新增竞对"));
        assert!(schema.is_slot_anchor("新增竞对1"));
        assert!(schema.is_slot_anchor("新增竞对12"));
        assert!(!schema.is_slot_anchor("近15天5km内新增竞对数量"));
        assert!(!schema.is_slot_anchor("新增竞对备注"));
    }

    #[test]
    fn attribute_roles_are_case_insensitive_substrings() {
        let schema = ColumnSchema::default();
        assert_eq!(schema.attribute_role("品牌特性.1"), Some(AttributeRole::BrandTraits));
        assert_eq!(schema.attribute_role("SKU数"), Some(AttributeRole::CatalogSize));
        assert_eq!(schema.attribute_role("sku数.2"), Some(AttributeRole::CatalogSize));
        assert_eq!(schema.attribute_role("商补率"), Some(AttributeRole::SubsidyRate));
        assert_eq!(schema.attribute_role("备注"), None);
    }

    #[test]
    fn validate_accepts_complete_headers() {
        let schema = ColumnSchema::default();
        let t = table(&[
            "门店名称",
            "城市",
            "运营",
            "商圈类型",
            "5km内竞对数量",
            "近15天5km内新增竞对数量",
            "新增竞对1",
        ]);
        assert!(schema.validate(&t).is_ok());
    }

    #[test]
    fn validate_lists_every_missing_requirement() {
        let schema = ColumnSchema::default();
        let t = table(&["门店名称", "城市", "商圈类型"]);
        let err = schema.validate(&t).unwrap_err();
        match err {
            LoadError::InvalidSchema { missing } => {
                assert_eq!(missing.len(), 4);
                assert!(missing.contains(&"运营".to_string()));
                assert!(missing.contains(&"5km内竞对数量".to_string()));
                assert!(missing.contains(&"近15天5km内新增竞对数量".to_string()));
                assert!(missing.iter().any(|m| m.starts_with("competitor slot column")));
            }
            other => panic!("expected InvalidSchema, got {other:?}"),
        }
    }
}
