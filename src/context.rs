//! The read-only engine context shared by every query.

use crate::analyzers::barchart::barchart_aggregate;
use crate::analyzers::cards::summary_cards;
use crate::analyzers::dimension::Dimension;
use crate::analyzers::histogram::{filter_options, histogram_slice, score_histogram};
use crate::analyzers::services::service_score_summary;
use crate::analyzers::types::{BarchartRow, HistogramBin, ServiceScoreSummary, SummaryCards};
use crate::config::EngineConfig;
use crate::dataset::enrich::enrich;
use crate::dataset::loader::load_raw;
use crate::dataset::types::{Dataset, Record};
use crate::error::Result;
use crate::ranking::rank::{FeatureImportance, rank_all};
use crate::ranking::trainer::Trainer;
use std::sync::OnceLock;
use tracing::info;

/// Configuration plus the enriched dataset, built once and never mutated.
///
/// All query methods take `&self`, so a context can be shared across threads
/// behind an `Arc`. Dimensions arrive as strings from the presentation layer
/// and are rejected with [`EngineError::UnknownDimension`](crate::error::EngineError::UnknownDimension)
/// when not recognized.
pub struct EngineContext {
    config: EngineConfig,
    dataset: Dataset,
    trainer: Box<dyn Trainer + Send + Sync>,
    ranking: OnceLock<Vec<FeatureImportance>>,
}

impl EngineContext {
    /// Loads and enriches the dataset named by `config.data_path`.
    ///
    /// Any load or enrichment failure aborts construction; no partial dataset
    /// is ever exposed.
    #[tracing::instrument(skip_all, fields(path = %config.data_path.display()))]
    pub fn load(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let raw = load_raw(&config.data_path)?;
        let dataset = enrich(&raw, &config.enrichment_rules())?;
        info!(records = dataset.len(), "Engine context ready");
        Ok(Self::from_dataset(config, dataset))
    }

    /// Wraps an already enriched dataset, ranking with the configured decision tree.
    pub fn from_dataset(config: EngineConfig, dataset: Dataset) -> Self {
        let trainer = Box::new(config.tree);
        EngineContext {
            config,
            dataset,
            trainer,
            ranking: OnceLock::new(),
        }
    }

    /// Replaces the model used for feature importance.
    pub fn with_trainer(mut self, trainer: impl Trainer + Send + Sync + 'static) -> Self {
        self.trainer = Box::new(trainer);
        self.ranking = OnceLock::new();
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn barchart(&self, dimension: &str) -> Result<Vec<BarchartRow>> {
        let dimension: Dimension = dimension.parse()?;
        Ok(barchart_aggregate(&self.dataset, dimension))
    }

    pub fn histogram(&self, dimension: &str, filter: Option<&str>) -> Result<Vec<&Record>> {
        let dimension: Dimension = dimension.parse()?;
        Ok(histogram_slice(&self.dataset, dimension, filter))
    }

    pub fn score_histogram(&self, dimension: &str, filter: Option<&str>) -> Result<Vec<HistogramBin>> {
        let subset = self.histogram(dimension, filter)?;
        Ok(score_histogram(&subset, self.config.histogram_bins))
    }

    pub fn filter_options(&self, dimension: &str) -> Result<Vec<String>> {
        let dimension: Dimension = dimension.parse()?;
        Ok(filter_options(&self.dataset, dimension))
    }

    pub fn service_scores(
        &self,
        dimension: &str,
        filter: Option<&str>,
    ) -> Result<ServiceScoreSummary> {
        let subset = self.histogram(dimension, filter)?;
        Ok(service_score_summary(
            &subset,
            &self.config.service_tiers,
            self.config.targets,
        ))
    }

    pub fn summary_cards(&self, dimension: &str, filter: Option<&str>) -> Result<SummaryCards> {
        let subset = self.histogram(dimension, filter)?;
        Ok(summary_cards(&subset))
    }

    /// The `top_n` most important service features.
    ///
    /// The model is fitted on first use and the full ranking cached; a
    /// failed fit is not cached.
    pub fn feature_importance(&self, top_n: usize) -> Result<Vec<FeatureImportance>> {
        let ranked = match self.ranking.get() {
            Some(ranked) => ranked,
            None => {
                let ranked = rank_all(&self.dataset, &*self.trainer)?;
                self.ranking.get_or_init(|| ranked)
            }
        };
        Ok(ranked.iter().take(top_n).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::testing::dataset;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn context() -> EngineContext {
        let ds = dataset(&[("Eco", 5), ("Eco", 1), ("Business", 4), ("Business", 5)]);
        EngineContext::from_dataset(EngineConfig::default(), ds)
    }

    struct CountingTrainer(Arc<AtomicUsize>);

    impl Trainer for CountingTrainer {
        fn fit(&self, features: &[Vec<f64>], _labels: &[usize]) -> Result<Vec<f64>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0; features[0].len()])
        }
    }

    #[test]
    fn test_context_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineContext>();
    }

    #[test]
    fn test_unknown_dimension_is_rejected() {
        let ctx = context();
        let expected = EngineError::UnknownDimension("Foo".into());

        assert_eq!(ctx.barchart("Foo").unwrap_err(), expected);
        assert_eq!(ctx.histogram("Foo", None).unwrap_err(), expected);
        assert_eq!(ctx.service_scores("Foo", Some("All")).unwrap_err(), expected);
        assert_eq!(ctx.summary_cards("Foo", None).unwrap_err(), expected);
        assert_eq!(ctx.filter_options("Foo").unwrap_err(), expected);
    }

    #[test]
    fn test_queries_use_filter() {
        let ctx = context();

        assert_eq!(ctx.histogram("Class", Some("Eco")).unwrap().len(), 2);
        assert_eq!(ctx.summary_cards("Class", Some("Business")).unwrap().responses, 2);
        assert_eq!(ctx.summary_cards("Class", Some("All")).unwrap().responses, 4);

        let services = ctx.service_scores("Class", Some("First")).unwrap();
        assert!(services.rows.iter().all(|r| r.mean.is_none()));

        let bins = ctx.score_histogram("Class", None).unwrap();
        assert_eq!(bins.len(), 10);
    }

    #[test]
    fn test_ranking_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ctx = context().with_trainer(CountingTrainer(calls.clone()));

        assert_eq!(ctx.feature_importance(3).unwrap().len(), 3);
        assert_eq!(ctx.feature_importance(10).unwrap().len(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_ranking_is_not_cached() {
        let ds = dataset(&[("Eco", 5), ("Business", 5)]);
        let ctx = EngineContext::from_dataset(EngineConfig::default(), ds);

        assert!(matches!(
            ctx.feature_importance(10),
            Err(EngineError::Training(_))
        ));
        assert!(ctx.feature_importance(10).is_err());
        assert_eq!(ctx.dataset().len(), 2);
    }
}
