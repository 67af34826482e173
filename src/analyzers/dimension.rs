use crate::dataset::types::{Dataset, Record};
use crate::error::EngineError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Filter value that selects every record.
pub const ALL: &str = "All";

/// A categorical (or bucketed) column usable as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    AgeGroup,
    Class,
    CustomerType,
    FlightDistanceGroup,
    Gender,
    TypeOfTravel,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::AgeGroup,
        Dimension::Class,
        Dimension::CustomerType,
        Dimension::FlightDistanceGroup,
        Dimension::Gender,
        Dimension::TypeOfTravel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::AgeGroup => "AgeGroup",
            Dimension::Class => "Class",
            Dimension::CustomerType => "CustomerType",
            Dimension::FlightDistanceGroup => "FlightDistanceGroup",
            Dimension::Gender => "Gender",
            Dimension::TypeOfTravel => "TypeOfTravel",
        }
    }

    /// The record's value for this dimension.
    pub fn value(self, record: &Record) -> &str {
        match self {
            Dimension::AgeGroup => &record.age_group,
            Dimension::Class => &record.raw.travel_class,
            Dimension::CustomerType => &record.raw.customer_type,
            Dimension::FlightDistanceGroup => &record.distance_group,
            Dimension::Gender => &record.raw.gender,
            Dimension::TypeOfTravel => &record.raw.travel_type,
        }
    }

    /// Display order of two values: bucket declaration order for bucketed
    /// dimensions, lexicographic otherwise.
    pub fn compare(self, dataset: &Dataset, a: &str, b: &str) -> Ordering {
        match self {
            Dimension::AgeGroup => {
                let spec = dataset.age_buckets();
                spec.rank(a).cmp(&spec.rank(b)).then_with(|| a.cmp(b))
            }
            Dimension::FlightDistanceGroup => {
                let spec = dataset.distance_buckets();
                spec.rank(a).cmp(&spec.rank(b)).then_with(|| a.cmp(b))
            }
            _ => a.cmp(b),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = EngineError;

    /// Accepts the canonical names and the spaced column titles used by the dashboard.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "AgeGroup" | "Age Group" => Ok(Dimension::AgeGroup),
            "Class" => Ok(Dimension::Class),
            "CustomerType" | "Customer Type" => Ok(Dimension::CustomerType),
            "FlightDistanceGroup" | "Flight Distance Group" => Ok(Dimension::FlightDistanceGroup),
            "Gender" => Ok(Dimension::Gender),
            "TypeOfTravel" | "Type of Travel" => Ok(Dimension::TypeOfTravel),
            other => Err(EngineError::UnknownDimension(other.to_string())),
        }
    }
}
