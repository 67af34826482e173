use serde::{Deserialize, Serialize};
use std::fmt;

/// Performance tier of a service feature's mean score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Neutral,
    High,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Low => "Low",
            Tier::Neutral => "Neutral",
            Tier::High => "High",
        })
    }
}

/// Fixed cut-offs on the 0–10 scale.
///
/// | Mean                | Tier    |
/// |---------------------|---------|
/// | `< low`             | Low     |
/// | `low ..< neutral`   | Neutral |
/// | `>= neutral`        | High    |
/// | undefined (no rows) | Neutral |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub low: f64,
    pub neutral: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds {
            low: 5.0,
            neutral: 7.0,
        }
    }
}

impl TierThresholds {
    pub fn tier(&self, mean: Option<f64>) -> Tier {
        match mean {
            Some(m) if m < self.low => Tier::Low,
            Some(m) if m >= self.neutral => Tier::High,
            _ => Tier::Neutral,
        }
    }
}
