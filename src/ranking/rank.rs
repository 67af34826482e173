use crate::dataset::types::{Dataset, SERVICE_FEATURE_COUNT, ServiceFeature};
use crate::error::{EngineError, Result};
use crate::ranking::trainer::Trainer;
use serde::Serialize;
use tracing::info;

/// Contribution of one service feature to predicting the satisfaction group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
    pub label: String,
}

/// Every service feature ranked by importance, highest first.
///
/// Ties keep feature declaration order.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn rank_all(dataset: &Dataset, trainer: &dyn Trainer) -> Result<Vec<FeatureImportance>> {
    let features: Vec<Vec<f64>> = dataset
        .records()
        .iter()
        .map(|r| r.ratings.iter().map(|&v| f64::from(v)).collect())
        .collect();
    let labels: Vec<usize> = dataset
        .records()
        .iter()
        .map(|r| r.satisfaction_group.index())
        .collect();

    let importances = trainer.fit(&features, &labels)?;
    if importances.len() != SERVICE_FEATURE_COUNT {
        return Err(EngineError::Training(format!(
            "trainer returned {} importances for {} features",
            importances.len(),
            SERVICE_FEATURE_COUNT
        )));
    }

    let mut ranked: Vec<FeatureImportance> = ServiceFeature::ALL
        .iter()
        .zip(importances)
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.column().to_string(),
            importance,
            label: format!("{:.1}%", importance * 100.0),
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    if let Some(top) = ranked.first() {
        info!(top_feature = %top.feature, importance = top.importance, "Features ranked");
    }

    Ok(ranked)
}

/// The `top_n` most important service features, highest first.
pub fn rank_features(
    dataset: &Dataset,
    top_n: usize,
    trainer: &dyn Trainer,
) -> Result<Vec<FeatureImportance>> {
    let mut ranked = rank_all(dataset, trainer)?;
    ranked.truncate(top_n);
    Ok(ranked)
}
