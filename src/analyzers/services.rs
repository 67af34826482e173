use crate::analyzers::tier::TierThresholds;
use crate::analyzers::types::{ServiceScoreRow, ServiceScoreSummary, ServiceTargets};
use crate::analyzers::utility::{mean, round2, stddev};
use crate::dataset::types::{MAX_RATING, MAX_SCORE, Record, ServiceFeature};

/// Mean score of every service feature over `subset`, with its tier.
///
/// Ratings are rescaled from 0–5 to the 0–10 score scale so the means line
/// up with the reference targets. Tiers are assigned on the exact mean; the
/// reported mean is rounded to 2 decimals. An empty subset reports every
/// feature with no mean and the Neutral tier.
pub fn service_score_summary(
    subset: &[&Record],
    thresholds: &TierThresholds,
    targets: ServiceTargets,
) -> ServiceScoreSummary {
    let scale = MAX_SCORE / MAX_RATING;

    let rows = ServiceFeature::ALL
        .iter()
        .map(|&feature| {
            let values: Vec<f64> = subset
                .iter()
                .map(|r| f64::from(r.rating(feature)) * scale)
                .collect();

            let avg = mean(&values);
            let sd = avg.map_or(0.0, |m| round2(stddev(&values, m)));
            let tier = thresholds.tier(avg);
            let avg = avg.map(round2);

            ServiceScoreRow {
                feature: feature.column().to_string(),
                mean: avg,
                stddev: sd,
                tier,
                label: avg.map_or_else(|| "n/a".to_string(), |m| format!("{m:.2}")),
            }
        })
        .collect();

    ServiceScoreSummary { rows, targets }
}
