use crate::analyzers::types::{GroupShare, SummaryCards};
use crate::analyzers::utility::{mean, pct, round2};
use crate::dataset::types::{Record, SatisfactionGroup};

/// Card order on the dashboard.
const CARD_ORDER: [SatisfactionGroup; 3] = [
    SatisfactionGroup::Satisfied,
    SatisfactionGroup::Neutral,
    SatisfactionGroup::Dissatisfied,
];

/// Response count, mean score and per-group shares for `subset`.
///
/// Labels print figures with their decimal point (`50.0%`, `8.0`); a group
/// with no responses reads `0%`.
pub fn summary_cards(subset: &[&Record]) -> SummaryCards {
    let responses = subset.len();
    let scores: Vec<f64> = subset.iter().map(|r| r.score).collect();
    let mean_score = mean(&scores).map(round2);

    let groups = CARD_ORDER
        .iter()
        .map(|&group| {
            let count = subset
                .iter()
                .filter(|r| r.satisfaction_group == group)
                .count();
            let percentage = pct(count, responses);
            GroupShare {
                group,
                count,
                percentage,
                label: if count == 0 {
                    format!("{group}: 0 | 0%")
                } else {
                    format!("{group}: {count} | {percentage:?}%")
                },
            }
        })
        .collect();

    SummaryCards {
        responses,
        mean_score,
        groups,
        responses_label: format!("Number of Searches: {responses}"),
        mean_label: match mean_score {
            Some(m) => format!("Mean Evaluation: {m:?}"),
            None => "Mean Evaluation: n/a".to_string(),
        },
    }
}
