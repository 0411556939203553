use compwatch_core::{RegionLabel, RegionLists, Regional};

use crate::geocoder::{Geocoder, NoopGeocoder};

/// Classifies stores as urban or county-tier from their names.
///
/// The cascade, first verdict wins:
/// 1. county allow-list substring → `County`
/// 2. district allow-list substring → `Urban`
/// 3. geocoder hint, by the suffix of the resolved area name
/// 4. county keywords → `County`, then urban keywords → `Urban`
/// 5. `County`
///
/// Construct once per run and share by reference; classification itself is
/// a pure function of the lists, the geocoder answer and the input.
pub struct RegionClassifier {
    lists: RegionLists,
    geocoder: Box<dyn Geocoder>,
}

impl Default for RegionClassifier {
    fn default() -> Self {
        Self::new(RegionLists::default())
    }
}

impl RegionClassifier {
    /// A classifier over `lists` with no geocoder.
    #[must_use]
    pub fn new(lists: RegionLists) -> Self {
        Self {
            lists,
            geocoder: Box::new(NoopGeocoder),
        }
    }

    #[must_use]
    pub fn with_geocoder(mut self, geocoder: Box<dyn Geocoder>) -> Self {
        self.geocoder = geocoder;
        self
    }

    #[must_use]
    pub fn lists(&self) -> &RegionLists {
        &self.lists
    }

    /// Region label for a store. Blank names are `County`.
    #[must_use]
    pub fn classify(&self, store_name: &str, city: Option<&str>) -> RegionLabel {
        if store_name.trim().is_empty() {
            return RegionLabel::County;
        }

        if contains_any(store_name, &self.lists.county_names) {
            return RegionLabel::County;
        }
        if contains_any(store_name, &self.lists.district_names) {
            return RegionLabel::Urban;
        }
        if let Some(label) = self.geocoder_hint(store_name, city) {
            return label;
        }
        if contains_any(store_name, &self.lists.county_keywords) {
            return RegionLabel::County;
        }
        if contains_any(store_name, &self.lists.urban_keywords) {
            return RegionLabel::Urban;
        }

        RegionLabel::County
    }

    /// Sets the region label of every row and returns the rows. Rows are
    /// classified independently of each other.
    #[must_use]
    pub fn classify_batch<T: Regional>(&self, mut rows: Vec<T>) -> Vec<T> {
        let mut urban = 0usize;
        for row in &mut rows {
            let city = Some(row.city()).filter(|c| !c.trim().is_empty());
            let label = self.classify(row.store_name(), city);
            if label == RegionLabel::Urban {
                urban += 1;
            }
            row.set_region(label);
        }

        tracing::info!(
            rows = rows.len(),
            urban,
            county = rows.len() - urban,
            "classified store regions"
        );
        rows
    }

    fn geocoder_hint(&self, store_name: &str, city: Option<&str>) -> Option<RegionLabel> {
        let address = match city {
            Some(city) if !city.trim().is_empty() => format!("{city}{store_name}"),
            _ => store_name.to_owned(),
        };

        match self.geocoder.resolve_area(&address, city) {
            Ok(area) => area.as_deref().and_then(area_suffix_label),
            Err(e) => {
                tracing::debug!(store = store_name, error = %e, "geocoder lookup failed");
                None
            }
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && haystack.contains(needle.as_str()))
}

/// Label implied by an administrative area name's suffix. County-level
/// cities (`...市`) count as county-tier.
fn area_suffix_label(area: &str) -> Option<RegionLabel> {
    let area = area.trim().to_lowercase();
    if area.ends_with('区') || area.ends_with("district") {
        Some(RegionLabel::Urban)
    } else if area.ends_with('县')
        || area.ends_with('市')
        || area.ends_with("county")
        || area.ends_with("city")
    {
        Some(RegionLabel::County)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
