//! Workbook to report, through the real loader and classifier.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use compwatch_analysis::{load_dataset, Dataset, DetailFilter, DetailSort, SortKey};
use compwatch_core::{BusinessCircleType, RegionLabel};
use compwatch_ingest::LoadError;
use compwatch_region::RegionClassifier;
use rust_xlsxwriter::Workbook;

static FIXTURE_SEQ: AtomicUsize = AtomicUsize::new(0);

const HEADERS: [&str; 14] = [
    "门店名称",
    "城市",
    "运营",
    "商圈类型",
    "5km内竞对数量",
    "近15天5km内新增竞对数量",
    "新增竞对",
    "品牌特性",
    "SKU数",
    "商补率",
    "新增竞对2",
    "品牌特性",
    "SKU数",
    "商补率",
];

/// Store A: one competitor and a blank second slot. Store B: two.
fn write_two_store_workbook() -> PathBuf {
    let seq = FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "compwatch-e2e-{}-{seq}.xlsx",
        std::process::id()
    ));

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        let col = u16::try_from(col).unwrap();
        sheet.write_string(0, col, *header).unwrap();
    }

    sheet.write_string(1, 0, "阳光店").unwrap();
    sheet.write_string(1, 1, "南京").unwrap();
    sheet.write_string(1, 2, "张三").unwrap();
    sheet.write_string(1, 3, "强").unwrap();
    sheet.write_number(1, 4, 4.0).unwrap();
    sheet.write_number(1, 5, 1.0).unwrap();
    sheet.write_string(1, 6, "BrandX").unwrap();
    sheet.write_string(1, 7, "新客立减").unwrap();
    sheet.write_number(1, 8, 5000.0).unwrap();
    sheet.write_string(1, 9, "10%-20%").unwrap();

    sheet.write_string(2, 0, "江宁万达店").unwrap();
    sheet.write_string(2, 1, "南京").unwrap();
    sheet.write_string(2, 2, "李四").unwrap();
    sheet.write_string(2, 3, "弱").unwrap();
    sheet.write_number(2, 4, 6.0).unwrap();
    sheet.write_number(2, 5, 2.0).unwrap();
    sheet.write_string(2, 6, "BrandX").unwrap();
    sheet.write_string(2, 10, "BrandY").unwrap();
    sheet.write_string(2, 11, "满减").unwrap();
    sheet.write_number(2, 12, 2500.0).unwrap();

    workbook.save(&path).unwrap();
    path
}

fn dataset() -> Dataset {
    let path = write_two_store_workbook();
    let dataset = load_dataset(&path, &RegionClassifier::default()).unwrap();
    let _ = std::fs::remove_file(&path);
    dataset
}

#[test]
fn two_store_workbook_end_to_end() {
    let dataset = dataset();
    assert_eq!(dataset.records.len(), 3);
    assert_eq!(dataset.stores.len(), 2);

    let report = dataset.report(10);

    assert_eq!(report.city_summary.len(), 1);
    let nanjing = &report.city_summary[0];
    assert_eq!(nanjing.city, "南京");
    assert_eq!(nanjing.new_competitors, 3);
    assert!((nanjing.share - 100.0).abs() < 1e-9);

    assert_eq!(report.brand_ranking[0].brand, "BrandX");
    assert_eq!(report.brand_ranking[0].count, 2);
    assert_eq!(report.brand_ranking[1].brand, "BrandY");
    assert_eq!(report.brand_ranking[1].count, 1);

    let region_of = |name: &str| {
        dataset
            .stores
            .iter()
            .find(|s| s.store_name == name)
            .and_then(|s| s.region)
    };
    assert_eq!(region_of("江宁万达店"), Some(RegionLabel::Urban));
    assert_eq!(region_of("阳光店"), Some(RegionLabel::County));
    assert!(dataset.records.iter().all(|r| r.region.is_some()));

    assert_eq!(report.catalog_scale.medium, 1);
    assert_eq!(report.catalog_scale.small, 1);
    assert_eq!(report.subsidy_distribution.from_10_to_20, 1);
    assert_eq!(report.subsidy_distribution.none, 2);
    assert_eq!(report.circle_analysis[0].circle_type, BusinessCircleType::Strong);
    assert!(!report.insights.summary.is_empty());
}

#[test]
fn detail_view_over_loaded_dataset() {
    let dataset = dataset();
    let analyzer = dataset.analyzer();

    let urban = analyzer.competitor_details(
        &DetailFilter {
            region: Some(RegionLabel::Urban),
            ..DetailFilter::default()
        },
        None,
    );
    assert_eq!(urban.len(), 2);
    assert!(urban.iter().all(|r| r.store_name == "江宁万达店"));

    let by_catalog = analyzer.competitor_details(
        &DetailFilter::default(),
        Some(DetailSort {
            key: SortKey::CatalogSize,
            ascending: false,
        }),
    );
    let sizes: Vec<_> = by_catalog.iter().map(|r| r.catalog_size).collect();
    assert_eq!(sizes, vec![Some(5000.0), Some(2500.0), None]);
}

#[test]
fn rerunning_the_pipeline_is_idempotent() {
    let first = dataset().report(10);
    let second = dataset().report(10);
    assert_eq!(first, second);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["city_summary"][0]["new_competitors"], 3);
    assert_eq!(json["region_analysis"][0]["region"], "urban");
    assert!(json["subsidy_distribution"].get("10%-20%").is_some());
}

#[test]
fn missing_workbook_is_a_load_error() {
    let path = std::env::temp_dir().join("compwatch-e2e-does-not-exist.xlsx");
    let err = load_dataset(&path, &RegionClassifier::default()).unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound { .. }));
}
