use crate::analyzers::dimension::Dimension;
use crate::analyzers::types::BarchartRow;
use crate::analyzers::utility::pct;
use crate::dataset::types::{Dataset, SatisfactionGroup};
use std::collections::HashMap;

/// Counts records per (dimension value × satisfaction group).
///
/// Every observed dimension value yields three rows, one per group in
/// legend order, each carrying its share of that value's records.
pub fn barchart_aggregate(dataset: &Dataset, dimension: Dimension) -> Vec<BarchartRow> {
    let mut counts: HashMap<&str, [usize; 3]> = HashMap::new();
    for record in dataset.records() {
        counts.entry(dimension.value(record)).or_default()[record.satisfaction_group.index()] +=
            1;
    }

    let mut values: Vec<&str> = counts.keys().copied().collect();
    values.sort_by(|a, b| dimension.compare(dataset, a, b));

    let mut rows = Vec::with_capacity(values.len() * SatisfactionGroup::ALL.len());
    for value in values {
        let per_group = counts[value];
        let total: usize = per_group.iter().sum();

        for group in SatisfactionGroup::ALL {
            let count = per_group[group.index()];
            let percentage = pct(count, total);
            rows.push(BarchartRow {
                value: value.to_string(),
                group,
                count,
                percentage,
                label: format!("{count} ({percentage:.1}%)"),
            });
        }
    }

    rows
}
