//! Row types returned to the presentation layer.

use crate::analyzers::tier::Tier;
use crate::dataset::types::SatisfactionGroup;
use serde::{Deserialize, Serialize};

/// One bar: records of a dimension value within one satisfaction group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarchartRow {
    pub value: String,
    pub group: SatisfactionGroup,
    pub count: usize,
    pub percentage: f64,
    pub label: String,
}

/// One bin of the score distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub percent: f64,
    pub label: String,
}

/// Mean score of one service feature on the 0–10 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceScoreRow {
    pub feature: String,
    /// `None` when the subset is empty.
    pub mean: Option<f64>,
    pub stddev: f64,
    pub tier: Tier,
    pub label: String,
}

/// Reference lines drawn next to the service means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceTargets {
    pub general_target: f64,
    pub max_target: f64,
}

impl Default for ServiceTargets {
    fn default() -> Self {
        ServiceTargets {
            general_target: 7.0,
            max_target: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceScoreSummary {
    pub rows: Vec<ServiceScoreRow>,
    #[serde(flatten)]
    pub targets: ServiceTargets,
}

/// Count and share of one satisfaction group in a subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupShare {
    pub group: SatisfactionGroup,
    pub count: usize,
    pub percentage: f64,
    pub label: String,
}

/// Headline figures for a subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub responses: usize,
    pub mean_score: Option<f64>,
    pub groups: Vec<GroupShare>,
    pub responses_label: String,
    pub mean_label: String,
}
