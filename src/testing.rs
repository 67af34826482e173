//! Builders for in-memory survey data used by unit tests.

use crate::dataset::bucket::BucketSpec;
use crate::dataset::enrich::{EnrichmentRules, SatisfactionThresholds, enrich};
use crate::dataset::types::{Dataset, RawDataset, RawRecord};

/// A raw row where every service feature is rated `rating`.
///
/// With the default thresholds rating 5 is Satisfied, 4 Neutral and 3 or
/// lower Dissatisfied.
pub(crate) fn raw(id: u64, class: &str, rating: u8) -> RawRecord {
    RawRecord {
        id,
        gender: if id % 2 == 0 { "Female" } else { "Male" }.to_string(),
        customer_type: "Loyal Customer".to_string(),
        age: Some(20.0 + (id % 50) as f64),
        travel_type: "Business travel".to_string(),
        travel_class: class.to_string(),
        flight_distance: Some(100.0 * id as f64),
        inflight_wifi: Some(rating),
        time_convenient: Some(rating),
        online_booking: Some(rating),
        gate_location: Some(rating),
        food_and_drink: Some(rating),
        online_boarding: Some(rating),
        seat_comfort: Some(rating),
        inflight_entertainment: Some(rating),
        on_board_service: Some(rating),
        leg_room: Some(rating),
        baggage_handling: Some(rating),
        checkin: Some(rating),
        inflight_service: Some(rating),
        cleanliness: Some(rating),
        departure_delay: Some(0.0),
        arrival_delay: Some(0.0),
        satisfaction: if rating >= 4 {
            "satisfied"
        } else {
            "neutral or dissatisfied"
        }
        .to_string(),
    }
}

pub(crate) fn rules() -> EnrichmentRules {
    EnrichmentRules {
        satisfaction: SatisfactionThresholds::default(),
        age_buckets: BucketSpec::age(),
        distance_buckets: BucketSpec::distance(),
    }
}

pub(crate) fn dataset_from(records: Vec<RawRecord>) -> Dataset {
    let raw = RawDataset {
        source: "test".to_string(),
        records,
    };
    enrich(&raw, &rules()).unwrap()
}

/// Builds a dataset from `(class, rating)` pairs, ids assigned in order from 1.
pub(crate) fn dataset(rows: &[(&str, u8)]) -> Dataset {
    dataset_from(
        rows.iter()
            .enumerate()
            .map(|(i, (class, rating))| raw(i as u64 + 1, class, *rating))
            .collect(),
    )
}
