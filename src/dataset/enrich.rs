//! Derived-field enrichment: score, satisfaction group and bucket labels.

use crate::dataset::bucket::BucketSpec;
use crate::dataset::types::{
    Dataset, MAX_RATING, MAX_SCORE, RawDataset, RawRecord, Record, SERVICE_FEATURE_COUNT,
    SatisfactionGroup, ServiceFeature,
};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Score cut-offs for [`SatisfactionGroup`].
///
/// | Score                              | Group        |
/// |------------------------------------|--------------|
/// | `< neutral_from`                   | Dissatisfied |
/// | `neutral_from ..< satisfied_from`  | Neutral      |
/// | `>= satisfied_from`                | Satisfied    |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatisfactionThresholds {
    pub neutral_from: f64,
    pub satisfied_from: f64,
}

impl Default for SatisfactionThresholds {
    fn default() -> Self {
        SatisfactionThresholds {
            neutral_from: 7.0,
            satisfied_from: 9.0,
        }
    }
}

impl SatisfactionThresholds {
    pub fn classify(&self, score: f64) -> SatisfactionGroup {
        match score {
            s if s >= self.satisfied_from => SatisfactionGroup::Satisfied,
            s if s >= self.neutral_from => SatisfactionGroup::Neutral,
            _ => SatisfactionGroup::Dissatisfied,
        }
    }
}

/// Everything the enricher needs besides the raw rows.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRules {
    pub satisfaction: SatisfactionThresholds,
    pub age_buckets: BucketSpec,
    pub distance_buckets: BucketSpec,
}

/// Satisfaction score on the 0–10 scale: the mean service rating, rescaled and rounded.
///
/// The raw `satisfaction` label is not an input; it is carried through unchanged.
pub fn score(ratings: &[u8; SERVICE_FEATURE_COUNT]) -> f64 {
    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    let mean = f64::from(sum) / SERVICE_FEATURE_COUNT as f64;
    (mean * MAX_SCORE / MAX_RATING).round()
}

fn ratings(raw: &RawRecord) -> Result<[u8; SERVICE_FEATURE_COUNT]> {
    let mut ratings = [0u8; SERVICE_FEATURE_COUNT];
    for feature in ServiceFeature::ALL {
        let value = raw.rating(feature).ok_or(EngineError::Schema {
            id: raw.id,
            column: feature.column(),
        })?;
        if f64::from(value) > MAX_RATING {
            return Err(EngineError::RatingOutOfRange {
                id: raw.id,
                column: feature.column(),
                value,
            });
        }
        ratings[feature.index()] = value;
    }
    Ok(ratings)
}

fn enrich_record(raw: &RawRecord, rules: &EnrichmentRules) -> Result<Record> {
    let age = raw.age.ok_or(EngineError::Schema {
        id: raw.id,
        column: "Age",
    })?;
    let distance = raw.flight_distance.ok_or(EngineError::Schema {
        id: raw.id,
        column: "Flight Distance",
    })?;
    let ratings = ratings(raw)?;
    let score = score(&ratings);

    Ok(Record {
        raw: raw.clone(),
        ratings,
        score,
        satisfaction_group: rules.satisfaction.classify(score),
        age_group: rules.age_buckets.classify(age).to_string(),
        distance_group: rules.distance_buckets.classify(distance).to_string(),
    })
}

/// Builds the enriched dataset from the raw rows. The raw dataset is left untouched.
///
/// # Errors
///
/// Returns [`EngineError::Schema`] naming the first record with an empty
/// `Age`, `Flight Distance` or service rating cell, and
/// [`EngineError::RatingOutOfRange`] for a rating above 5.
#[tracing::instrument(skip_all, fields(source = %raw.source, rows = raw.records.len()))]
pub fn enrich(raw: &RawDataset, rules: &EnrichmentRules) -> Result<Dataset> {
    let records = raw
        .records
        .iter()
        .map(|r| enrich_record(r, rules))
        .collect::<Result<Vec<_>>>()?;

    let mut counts = [0usize; 3];
    for record in &records {
        counts[record.satisfaction_group.index()] += 1;
    }
    info!(
        dissatisfied = counts[0],
        neutral = counts[1],
        satisfied = counts[2],
        "Survey data enriched"
    );

    Ok(Dataset {
        records,
        age_buckets: rules.age_buckets.clone(),
        distance_buckets: rules.distance_buckets.clone(),
    })
}
