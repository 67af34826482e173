//! Ordered bucket rules for turning a continuous value into a label.

use serde::{Deserialize, Serialize};

/// Label assigned to values that fall outside every declared bin (or are NaN).
pub const UNCLASSIFIED: &str = "Unclassified";

/// One bin: everything from the previous upper bound (or `lower`) up to `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub upper: f64,
    pub label: String,
}

impl Bin {
    pub fn new(upper: f64, label: &str) -> Self {
        Bin {
            upper,
            label: label.to_string(),
        }
    }
}

/// Ordered list of `(upper, label)` rules starting at `lower`.
///
/// Bins are half-open `[lo, hi)`; the final upper edge is inclusive.
///
/// | Value                     | Bucket          |
/// |---------------------------|-----------------|
/// | `< lower` or NaN          | `Unclassified`  |
/// | `[lo, hi)`                | that bin        |
/// | `== last.upper`           | last bin        |
/// | `> last.upper`            | `Unclassified`  |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub lower: f64,
    pub bins: Vec<Bin>,
}

impl BucketSpec {
    pub fn new(lower: f64, bins: Vec<Bin>) -> Self {
        BucketSpec { lower, bins }
    }

    /// Age bins used by the dashboard.
    pub fn age() -> Self {
        BucketSpec::new(
            0.0,
            vec![
                Bin::new(18.0, "0-17"),
                Bin::new(30.0, "18-29"),
                Bin::new(45.0, "30-44"),
                Bin::new(60.0, "45-59"),
                Bin::new(100.0, "60+"),
            ],
        )
    }

    /// Flight distance bins (miles).
    pub fn distance() -> Self {
        BucketSpec::new(
            0.0,
            vec![
                Bin::new(500.0, "0-499"),
                Bin::new(1000.0, "500-999"),
                Bin::new(2000.0, "1000-1999"),
                Bin::new(3000.0, "2000-2999"),
                Bin::new(5000.0, "3000+"),
            ],
        )
    }

    pub fn classify(&self, value: f64) -> &str {
        // NaN fails this comparison too
        if !(value >= self.lower) {
            return UNCLASSIFIED;
        }

        for bin in &self.bins {
            if value < bin.upper {
                return &bin.label;
            }
        }

        match self.bins.last() {
            Some(last) if value == last.upper => &last.label,
            _ => UNCLASSIFIED,
        }
    }

    /// Position of `label` in declaration order; `Unclassified` and unknown labels sort last.
    pub fn rank(&self, label: &str) -> usize {
        self.bins
            .iter()
            .position(|b| b.label == label)
            .unwrap_or(self.bins.len())
    }

    /// Checks that edges are strictly ascending and labels are distinct and non-empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.bins.is_empty() {
            return Err("bucket spec has no bins".into());
        }

        let mut prev = self.lower;
        for bin in &self.bins {
            if !(bin.upper > prev) {
                return Err(format!(
                    "bin '{}' upper edge {} is not above {}",
                    bin.label, bin.upper, prev
                ));
            }
            if bin.label.is_empty() || bin.label == UNCLASSIFIED {
                return Err(format!("bin label '{}' is reserved or empty", bin.label));
            }
            prev = bin.upper;
        }

        for (i, bin) in self.bins.iter().enumerate() {
            if self.bins[..i].iter().any(|b| b.label == bin.label) {
                return Err(format!("duplicate bin label '{}'", bin.label));
            }
        }

        Ok(())
    }
}
