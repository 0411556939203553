//! Randomised checks of the unpivot invariants over generated wide tables.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use compwatch_core::CompetitorRecord;
use compwatch_ingest::{detect_slot_groups, to_long, to_store_summary, Cell, WideTable};

const CASES: usize = 200;

const STATIC_HEADERS: [&str; 6] = [
    "门店名称",
    "城市",
    "运营",
    "商圈类型",
    "5km内竞对数量",
    "近15天5km内新增竞对数量",
];
const ATTRIBUTE_HEADERS: [&str; 4] = ["品牌特性", "sku数", "商补率", "备注"];
const BRANDS: [&str; 5] = ["满佳喜", "乐尔乐", "快驴", "美宜佳", "便利蜂"];
const CITIES: [&str; 3] = ["南京", "合肥", "徐州"];
const CIRCLES: [&str; 4] = ["强", "中", "弱", ""];

struct Generated {
    table: WideTable,
    anchors: Vec<usize>,
}

impl Generated {
    fn filled_slots(&self, row: &[Cell]) -> usize {
        self.anchors.iter().filter(|&&a| !row[a].is_absent()).count()
    }

    /// Long records split back into the source row each came from.
    fn records_by_row(&self) -> Vec<Vec<CompetitorRecord>> {
        let mut records = to_long(&self.table).into_iter();
        self.table
            .rows()
            .iter()
            .map(|row| records.by_ref().take(self.filled_slots(row)).collect())
            .collect()
    }
}

fn random_table(rng: &mut StdRng) -> Generated {
    let mut headers: Vec<String> = STATIC_HEADERS.iter().map(|s| (*s).to_string()).collect();
    let mut anchors = Vec::new();

    let slot_count = rng.random_range(1..=6);
    for slot in 0..slot_count {
        anchors.push(headers.len());
        headers.push(if slot == 0 {
            "新增竞对".to_string()
        } else {
            format!("新增竞对{}", slot + 1)
        });
        for attr in ATTRIBUTE_HEADERS {
            if rng.random_bool(0.7) {
                headers.push(attr.to_string());
            }
        }
    }

    let row_count = rng.random_range(0..25);
    let mut rows = Vec::with_capacity(row_count);
    let mut names: Vec<String> = Vec::new();
    for store in 0..row_count {
        let mut row = vec![Cell::Empty; headers.len()];
        row[0] = match rng.random_range(0..8) {
            0 => Cell::Empty,
            1 => Cell::Text("  ".to_string()),
            2 if !names.is_empty() => Cell::Text(names[rng.random_range(0..names.len())].clone()),
            _ => {
                names.push(format!("门店{store}"));
                Cell::Text(format!("门店{store}"))
            }
        };
        row[1] = Cell::Text(CITIES[rng.random_range(0..CITIES.len())].to_string());
        row[2] = Cell::Text("运营".to_string());
        row[3] = Cell::Text(CIRCLES[rng.random_range(0..CIRCLES.len())].to_string());
        row[4] = Cell::Number(f64::from(rng.random_range(0..30u32)));
        row[5] = Cell::Number(f64::from(rng.random_range(0..6u32)));

        for &anchor in &anchors {
            row[anchor] = match rng.random_range(0..4) {
                0 => Cell::Empty,
                1 => Cell::Text("   ".to_string()),
                _ => Cell::Text(BRANDS[rng.random_range(0..BRANDS.len())].to_string()),
            };
        }
        rows.push(row);
    }

    Generated {
        table: WideTable::new(headers, rows),
        anchors,
    }
}

#[test]
fn record_count_equals_non_blank_slot_cells() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);
    for _ in 0..CASES {
        let generated = random_table(&mut rng);
        let expected: usize = generated
            .table
            .rows()
            .iter()
            .map(|row| generated.filled_slots(row))
            .sum();

        assert_eq!(to_long(&generated.table).len(), expected);
        assert_eq!(
            to_store_summary(&generated.table).len(),
            generated.table.row_count()
        );
    }
}

#[test]
fn every_anchor_becomes_a_group() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0002);
    for _ in 0..CASES {
        let generated = random_table(&mut rng);
        let groups = detect_slot_groups(&generated.table);
        let anchors: Vec<usize> = groups.iter().map(|g| g.anchor).collect();
        assert_eq!(anchors, generated.anchors);

        for (pos, group) in groups.iter().enumerate() {
            let end = groups
                .get(pos + 1)
                .map_or(generated.table.headers().len(), |next| next.anchor);
            for idx in [group.brand_traits, group.catalog_size, group.subsidy_rate]
                .into_iter()
                .flatten()
            {
                assert!(idx > group.anchor && idx < end, "attribute leaked out of its span");
            }
        }
    }
}

#[test]
fn static_fields_match_the_source_row() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0003);
    for _ in 0..CASES {
        let generated = random_table(&mut rng);
        let stores = to_store_summary(&generated.table);
        let by_row = generated.records_by_row();
        assert_eq!(by_row.len(), stores.len());

        for ((row, records), store) in generated.table.rows().iter().zip(&by_row).zip(&stores) {
            assert_eq!(store.store_name, row[0].text().unwrap_or_default());
            for record in records {
                assert_eq!(record.city, store.city);
                assert_eq!(record.operator, store.operator);
                assert_eq!(record.circle_type, store.circle_type);
                assert_eq!(record.nearby_competitors, store.nearby_competitors);
                assert_eq!(record.new_competitors, store.new_competitors);
                assert_eq!(record.store_summary(), *store);
            }
        }
    }
}

#[test]
fn slot_sequence_is_one_based_and_increasing_per_row() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0004);
    for _ in 0..CASES {
        let generated = random_table(&mut rng);
        let slot_count = u32::try_from(generated.anchors.len()).expect("slot count fits");

        for (row, records) in generated.table.rows().iter().zip(generated.records_by_row()) {
            let expected: Vec<u32> = generated
                .anchors
                .iter()
                .zip(1u32..)
                .filter(|&(&a, _)| !row[a].is_absent())
                .map(|(_, seq)| seq)
                .collect();
            let seqs: Vec<u32> = records.iter().map(|r| r.slot_seq).collect();
            assert_eq!(seqs, expected);
            assert!(seqs.iter().all(|seq| (1..=slot_count).contains(seq)));
        }
    }
}
