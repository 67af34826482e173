//! CART decision tree with Gini impurity, used only for its feature importances.

use crate::error::{EngineError, Result};
use crate::ranking::trainer::Trainer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Splits must reduce weighted impurity by more than this.
const MIN_DECREASE: f64 = 1e-12;

/// Greedy binary decision tree. Importance of a feature is the total weighted
/// Gini decrease of the splits made on it, normalized to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionTreeTrainer {
    pub max_depth: usize,
    pub min_samples_split: usize,
}

impl Default for DecisionTreeTrainer {
    fn default() -> Self {
        DecisionTreeTrainer {
            max_depth: 10,
            min_samples_split: 2,
        }
    }
}

struct Split {
    feature: usize,
    threshold: f64,
    decrease: f64,
}

struct Grower<'a> {
    features: &'a [Vec<f64>],
    labels: &'a [usize],
    classes: usize,
    width: usize,
    params: DecisionTreeTrainer,
    importances: Vec<f64>,
    nodes: usize,
}

fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

impl Grower<'_> {
    fn class_counts(&self, rows: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.classes];
        for &i in rows {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    fn grow(&mut self, rows: &[usize], depth: usize) {
        self.nodes += 1;

        let counts = self.class_counts(rows);
        let impurity = gini(&counts, rows.len());

        if depth >= self.params.max_depth
            || rows.len() < self.params.min_samples_split.max(2)
            || impurity == 0.0
        {
            return;
        }

        let Some(split) = self.best_split(rows, &counts, impurity) else {
            return;
        };

        self.importances[split.feature] += split.decrease;

        let (left, right): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .copied()
            .partition(|&i| self.features[i][split.feature] <= split.threshold);

        self.grow(&left, depth + 1);
        self.grow(&right, depth + 1);
    }

    /// Best threshold over all features; ties keep the earlier feature and lower threshold.
    fn best_split(&self, rows: &[usize], counts: &[usize], impurity: f64) -> Option<Split> {
        let n = rows.len();
        let parent = n as f64 * impurity;
        let mut best: Option<Split> = None;
        let mut pairs: Vec<(f64, usize)> = Vec::with_capacity(n);

        for feature in 0..self.width {
            pairs.clear();
            pairs.extend(
                rows.iter()
                    .map(|&i| (self.features[i][feature], self.labels[i])),
            );
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = vec![0usize; self.classes];
            let mut right = counts.to_vec();

            for i in 0..n - 1 {
                let (value, class) = pairs[i];
                left[class] += 1;
                right[class] -= 1;

                let next = pairs[i + 1].0;
                if value == next {
                    continue;
                }

                let n_left = i + 1;
                let n_right = n - n_left;
                let decrease = parent
                    - n_left as f64 * gini(&left, n_left)
                    - n_right as f64 * gini(&right, n_right);

                if decrease > best.as_ref().map_or(MIN_DECREASE, |b| b.decrease) {
                    best = Some(Split {
                        feature,
                        threshold: (value + next) / 2.0,
                        decrease,
                    });
                }
            }
        }

        best
    }
}

impl Trainer for DecisionTreeTrainer {
    fn fit(&self, features: &[Vec<f64>], labels: &[usize]) -> Result<Vec<f64>> {
        if features.len() != labels.len() {
            return Err(EngineError::Training(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let width = features.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(EngineError::Training("no training data".into()));
        }
        if features.iter().any(|row| row.len() != width) {
            return Err(EngineError::Training("feature rows differ in width".into()));
        }

        let distinct: BTreeSet<usize> = labels.iter().copied().collect();
        if distinct.len() < 2 {
            return Err(EngineError::Training(format!(
                "need at least two target classes, found {}",
                distinct.len()
            )));
        }

        let mut grower = Grower {
            features,
            labels,
            classes: distinct.last().map_or(0, |&c| c + 1),
            width,
            params: *self,
            importances: vec![0.0; width],
            nodes: 0,
        };

        let rows: Vec<usize> = (0..features.len()).collect();
        grower.grow(&rows, 0);

        let total: f64 = grower.importances.iter().sum();
        debug!(
            rows = rows.len(),
            nodes = grower.nodes,
            max_depth = self.max_depth,
            "Decision tree fitted"
        );

        let mut importances = grower.importances;
        if total > 0.0 {
            for v in &mut importances {
                *v /= total;
            }
        }

        Ok(importances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[[f64; 2]]) -> Vec<Vec<f64>> {
        values.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[4, 0], 4), 0.0);
        assert_eq!(gini(&[2, 2], 4), 0.5);
        assert_eq!(gini(&[], 0), 0.0);
    }

    #[test]
    fn test_informative_feature_takes_all_importance() {
        // column 0 separates the classes, column 1 is constant
        let x = rows(&[[1.0, 3.0], [2.0, 3.0], [4.0, 3.0], [5.0, 3.0]]);
        let y = [0, 0, 1, 1];

        let importances = DecisionTreeTrainer::default().fit(&x, &y).unwrap();
        assert_eq!(importances, vec![1.0, 0.0]);
    }

    #[test]
    fn test_importances_are_normalized() {
        let x = rows(&[
            [1.0, 1.0],
            [1.0, 2.0],
            [2.0, 1.0],
            [2.0, 2.0],
            [3.0, 1.0],
            [3.0, 2.0],
        ]);
        let y = [0, 0, 0, 1, 2, 2];

        let importances = DecisionTreeTrainer::default().fit(&x, &y).unwrap();
        let total: f64 = importances.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(importances[0] > importances[1]);
        assert!(importances[1] > 0.0);
    }

    #[test]
    fn test_three_classes() {
        let x = rows(&[[0.0, 0.0], [1.0, 0.0], [5.0, 0.0], [6.0, 0.0], [9.0, 0.0]]);
        let y = [0, 0, 1, 1, 2];
        let importances = DecisionTreeTrainer::default().fit(&x, &y).unwrap();
        assert_eq!(importances, vec![1.0, 0.0]);
    }

    #[test]
    fn test_depth_zero_makes_no_split() {
        let x = rows(&[[1.0, 0.0], [2.0, 0.0]]);
        let trainer = DecisionTreeTrainer {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(trainer.fit(&x, &[0, 1]).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_single_class_fails() {
        let x = rows(&[[1.0, 0.0], [2.0, 0.0]]);
        let err = DecisionTreeTrainer::default().fit(&x, &[1, 1]).unwrap_err();
        assert!(matches!(err, EngineError::Training(_)));
    }

    #[test]
    fn test_length_mismatch_fails() {
        let x = rows(&[[1.0, 0.0], [2.0, 0.0]]);
        assert!(DecisionTreeTrainer::default().fit(&x, &[0]).is_err());
        assert!(DecisionTreeTrainer::default().fit(&[], &[]).is_err());
    }
}
