//! Diagnostics: slot layout of a workbook and single-name classification.

use std::path::Path;

use compwatch_ingest::{detect_slot_groups, load};
use compwatch_region::RegionClassifier;

/// Print one line per slot group with the headers of its columns.
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded.
pub(crate) fn run_slots(file: &Path) -> anyhow::Result<()> {
    let table = load(file)?;
    let groups = detect_slot_groups(&table);
    let headers = table.headers();
    let header = |index: Option<usize>| index.map_or("-", |i| headers[i].as_str());

    println!("{} slot groups in {}", groups.len(), file.display());
    for (seq, group) in groups.iter().enumerate() {
        println!(
            "{:>3}  {}  brand={}  catalog={}  subsidy={}",
            seq + 1,
            group.anchor_header,
            header(group.brand_traits),
            header(group.catalog_size),
            header(group.subsidy_rate),
        );
    }
    Ok(())
}

pub(crate) fn run_classify(classifier: &RegionClassifier, store_name: &str, city: Option<&str>) {
    println!("{}", classifier.classify(store_name, city));
}
