//! Engine configuration.
//!
//! Every threshold, bin edge and target has a compiled-in default; a JSON
//! file can override any subset of them:
//! ```json
//! {
//!   "data_path": "data/airline_passenger_satisfaction.csv",
//!   "satisfaction": { "neutral_from": 7.0, "satisfied_from": 9.0 },
//!   "service_tiers": { "low": 5.0, "neutral": 7.0 },
//!   "top_n": 10
//! }
//! ```

use crate::analyzers::tier::TierThresholds;
use crate::analyzers::types::ServiceTargets;
use crate::dataset::bucket::BucketSpec;
use crate::dataset::enrich::{EnrichmentRules, SatisfactionThresholds};
use crate::error::{EngineError, Result};
use crate::ranking::tree::DecisionTreeTrainer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub data_path: PathBuf,
    pub satisfaction: SatisfactionThresholds,
    pub age_buckets: BucketSpec,
    pub distance_buckets: BucketSpec,
    pub service_tiers: TierThresholds,
    pub targets: ServiceTargets,
    pub histogram_bins: usize,
    pub top_n: usize,
    pub tree: DecisionTreeTrainer,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            data_path: PathBuf::from("data/airline_passenger_satisfaction.csv"),
            satisfaction: SatisfactionThresholds::default(),
            age_buckets: BucketSpec::age(),
            distance_buckets: BucketSpec::distance(),
            service_tiers: TierThresholds::default(),
            targets: ServiceTargets::default(),
            histogram_bins: 10,
            top_n: 10,
            tree: DecisionTreeTrainer::default(),
        }
    }
}

impl EngineConfig {
    /// Loads and validates the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: EngineConfig = serde_json::from_str(&content).map_err(|e| {
            EngineError::Configuration(format!("invalid config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(EngineError::Configuration(msg));

        if !(self.satisfaction.neutral_from < self.satisfaction.satisfied_from) {
            return invalid(format!(
                "satisfaction.neutral_from ({}) must be below satisfied_from ({})",
                self.satisfaction.neutral_from, self.satisfaction.satisfied_from
            ));
        }
        if !(self.service_tiers.low < self.service_tiers.neutral) {
            return invalid(format!(
                "service_tiers.low ({}) must be below neutral ({})",
                self.service_tiers.low, self.service_tiers.neutral
            ));
        }
        if let Err(e) = self.age_buckets.validate() {
            return invalid(format!("age_buckets: {e}"));
        }
        if let Err(e) = self.distance_buckets.validate() {
            return invalid(format!("distance_buckets: {e}"));
        }
        if self.histogram_bins == 0 {
            return invalid("histogram_bins must be positive".into());
        }
        if self.top_n == 0 {
            return invalid("top_n must be positive".into());
        }

        Ok(())
    }

    pub fn enrichment_rules(&self) -> EnrichmentRules {
        EnrichmentRules {
            satisfaction: self.satisfaction,
            age_buckets: self.age_buckets.clone(),
            distance_buckets: self.distance_buckets.clone(),
        }
    }
}
