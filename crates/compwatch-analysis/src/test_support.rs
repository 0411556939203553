use compwatch_core::{BusinessCircleType, CompetitorRecord, RegionLabel, StoreSummary};

pub fn record(store: &str, city: &str, competitor: &str) -> CompetitorRecord {
    CompetitorRecord {
        store_name: store.to_string(),
        city: city.to_string(),
        operator: "ops".to_string(),
        circle_type: Some(BusinessCircleType::Strong),
        region: None,
        nearby_competitors: 0,
        new_competitors: 0,
        competitor_name: competitor.to_string(),
        brand_traits: None,
        catalog_size: None,
        subsidy_rate: None,
        slot_seq: 1,
    }
}

pub fn store(name: &str, city: &str, nearby: u32, new: u32) -> StoreSummary {
    StoreSummary {
        store_name: name.to_string(),
        city: city.to_string(),
        operator: "ops".to_string(),
        circle_type: Some(BusinessCircleType::Strong),
        nearby_competitors: nearby,
        new_competitors: new,
        region: None,
    }
}

/// Long records for `store` with one record per competitor, carrying the
/// store's static fields.
pub fn records_for(store: &StoreSummary, competitors: &[&str]) -> Vec<CompetitorRecord> {
    competitors
        .iter()
        .zip(1u32..)
        .map(|(&competitor, seq)| CompetitorRecord {
            store_name: store.store_name.clone(),
            city: store.city.clone(),
            operator: store.operator.clone(),
            circle_type: store.circle_type,
            region: store.region,
            nearby_competitors: store.nearby_competitors,
            new_competitors: store.new_competitors,
            competitor_name: competitor.to_string(),
            brand_traits: None,
            catalog_size: None,
            subsidy_rate: None,
            slot_seq: seq,
        })
        .collect()
}

pub fn with_region(mut store: StoreSummary, region: RegionLabel) -> StoreSummary {
    store.region = Some(region);
    store
}

pub fn with_circle(mut store: StoreSummary, circle: Option<BusinessCircleType>) -> StoreSummary {
    store.circle_type = circle;
    store
}
