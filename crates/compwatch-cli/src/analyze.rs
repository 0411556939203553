//! Report and detail-view command handlers.

use std::path::Path;

use compwatch_analysis::{load_dataset, DetailFilter, DetailSort};
use compwatch_region::RegionClassifier;

/// Load `file` and print the full analysis report as JSON.
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded or serialised.
pub(crate) fn run_report(
    file: &Path,
    classifier: &RegionClassifier,
    top_n: usize,
    pretty: bool,
) -> anyhow::Result<()> {
    let dataset = load_dataset(file, classifier)?;
    let report = dataset.report(top_n);
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}

/// Load `file` and print the matching competitor records as JSON.
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded or serialised.
pub(crate) fn run_details(
    file: &Path,
    classifier: &RegionClassifier,
    filter: &DetailFilter,
    sort: Option<DetailSort>,
) -> anyhow::Result<()> {
    let dataset = load_dataset(file, classifier)?;
    let rows = dataset.analyzer().competitor_details(filter, sort);
    tracing::info!(matched = rows.len(), total = dataset.records.len(), "detail view");
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
