//! Wide-to-long transformation.

use compwatch_core::{BusinessCircleType, CompetitorRecord, StoreSummary};

use crate::schema::ColumnSchema;
use crate::slots::{detect_slot_groups_with, SlotGroup};
use crate::table::{Cell, WideTable};

/// Column positions of the static per-store fields.
struct StaticColumns {
    store_name: Option<usize>,
    city: Option<usize>,
    operator: Option<usize>,
    circle_type: Option<usize>,
    nearby_count: Option<usize>,
    new_count: Option<usize>,
}

impl StaticColumns {
    fn locate(table: &WideTable, schema: &ColumnSchema) -> Self {
        Self {
            store_name: table.column_index(&schema.store_name),
            city: table.column_index(&schema.city),
            operator: table.column_index(&schema.operator),
            circle_type: table.column_index(&schema.circle_type),
            nearby_count: table.column_index(&schema.nearby_count),
            new_count: table.column_index(&schema.new_count),
        }
    }

    /// Store-level fields of `row`. A blank store name reads as `""`.
    fn read(&self, row: &[Cell]) -> StoreSummary {
        StoreSummary {
            store_name: cell_at(row, self.store_name).text().unwrap_or_default(),
            city: cell_at(row, self.city).text().unwrap_or_default(),
            operator: cell_at(row, self.operator).text().unwrap_or_default(),
            circle_type: cell_at(row, self.circle_type)
                .text()
                .and_then(|raw| BusinessCircleType::parse(&raw)),
            nearby_competitors: cell_at(row, self.nearby_count).count(),
            new_competitors: cell_at(row, self.new_count).count(),
            region: None,
        }
    }
}

static EMPTY: Cell = Cell::Empty;

fn cell_at(row: &[Cell], column: Option<usize>) -> &Cell {
    column.and_then(|idx| row.get(idx)).unwrap_or(&EMPTY)
}

#[must_use]
pub fn to_long(table: &WideTable) -> Vec<CompetitorRecord> {
    to_long_with(table, &ColumnSchema::default())
}

/// One [`CompetitorRecord`] per non-blank competitor slot, in row order and
/// then slot order. Region labels are left unset.
#[must_use]
pub fn to_long_with(table: &WideTable, schema: &ColumnSchema) -> Vec<CompetitorRecord> {
    let groups = detect_slot_groups_with(table, schema);
    if groups.is_empty() {
        tracing::warn!("no competitor slot columns found; long table is empty");
        return Vec::new();
    }

    let columns = StaticColumns::locate(table, schema);
    let mut records = Vec::new();

    for (row_idx, row) in table.rows().iter().enumerate() {
        let store = columns.read(row);
        if store.store_name.is_empty() {
            tracing::debug!(row = row_idx + 2, "row has no store name");
        }
        records.extend(expand_row(&store, row, &groups));
    }

    tracing::info!(
        stores = table.row_count(),
        slot_groups = groups.len(),
        records = records.len(),
        "unpivoted competitor slots"
    );
    records
}

fn expand_row<'a>(
    store: &'a StoreSummary,
    row: &'a [Cell],
    groups: &'a [SlotGroup],
) -> impl Iterator<Item = CompetitorRecord> + 'a {
    groups.iter().zip(1u32..).filter_map(move |(group, seq)| {
        let competitor_name = cell_at(row, Some(group.anchor)).text()?;
        Some(CompetitorRecord {
            store_name: store.store_name.clone(),
            city: store.city.clone(),
            operator: store.operator.clone(),
            circle_type: store.circle_type,
            region: store.region,
            nearby_competitors: store.nearby_competitors,
            new_competitors: store.new_competitors,
            competitor_name,
            brand_traits: cell_at(row, group.brand_traits).text(),
            catalog_size: cell_at(row, group.catalog_size).number(),
            subsidy_rate: cell_at(row, group.subsidy_rate).text(),
            slot_seq: seq,
        })
    })
}

#[must_use]
pub fn to_store_summary(table: &WideTable) -> Vec<StoreSummary> {
    to_store_summary_with(table, &ColumnSchema::default())
}

/// One [`StoreSummary`] per row. Duplicate and blank store names pass
/// through.
#[must_use]
pub fn to_store_summary_with(table: &WideTable, schema: &ColumnSchema) -> Vec<StoreSummary> {
    let columns = StaticColumns::locate(table, schema);
    table
        .rows()
        .iter()
        .map(|row| columns.read(row))
        .collect()
}
