use crate::analyzers::dimension::{ALL, Dimension};
use crate::analyzers::types::HistogramBin;
use crate::analyzers::utility::pct;
use crate::dataset::types::{Dataset, MAX_SCORE, Record};
use std::collections::BTreeSet;

/// Records whose `dimension` equals `filter`; every record for `None` or `"All"`.
///
/// A filter value that never occurs yields an empty subset.
pub fn histogram_slice<'a>(
    dataset: &'a Dataset,
    dimension: Dimension,
    filter: Option<&str>,
) -> Vec<&'a Record> {
    match filter {
        None | Some(ALL) => dataset.records().iter().collect(),
        Some(value) => dataset
            .records()
            .iter()
            .filter(|r| dimension.value(r) == value)
            .collect(),
    }
}

/// Values offered in the filter selector: `"All"` followed by the distinct
/// values of `dimension` in display order.
pub fn filter_options(dataset: &Dataset, dimension: Dimension) -> Vec<String> {
    let distinct: BTreeSet<&str> = dataset.records().iter().map(|r| dimension.value(r)).collect();

    let mut values: Vec<&str> = distinct.into_iter().collect();
    values.sort_by(|a, b| dimension.compare(dataset, a, b));

    std::iter::once(ALL)
        .chain(values)
        .map(str::to_string)
        .collect()
}

/// Distribution of scores over `bins` equal-width bins spanning 0–10.
///
/// Bins are half-open except the last, which also holds the maximum score.
/// Enrichment keeps scores within 0–10, so every record lands in a bin.
pub fn score_histogram(subset: &[&Record], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }

    let width = MAX_SCORE / bins as f64;
    let mut counts = vec![0usize; bins];
    let total = subset.len();

    for record in subset {
        let index = ((record.score / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = i as f64 * width;
            let upper = (i + 1) as f64 * width;
            HistogramBin {
                lower,
                upper,
                count,
                percent: pct(count, total),
                label: format!("{lower}-{upper}"),
            }
        })
        .collect()
}
