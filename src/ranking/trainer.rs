use crate::error::Result;

/// A classifier that can report how much each predictor contributed.
///
/// `features` is row-major: one inner vector per training example, all of
/// the same width. `labels` holds one class index per row. The returned
/// vector has one non-negative importance per feature column.
pub trait Trainer {
    fn fit(&self, features: &[Vec<f64>], labels: &[usize]) -> Result<Vec<f64>>;
}
