//! Record types shared by the loader, the enricher and the analyzers.

use crate::dataset::bucket::BucketSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of service-rating columns in the survey.
pub const SERVICE_FEATURE_COUNT: usize = 14;

/// Highest value on the 0–5 service rating scale.
pub const MAX_RATING: f64 = 5.0;

/// Highest value on the 0–10 satisfaction score scale.
pub const MAX_SCORE: f64 = 10.0;

/// A service dimension respondents rated on the 0–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceFeature {
    InflightWifi,
    TimeConvenient,
    OnlineBooking,
    GateLocation,
    FoodAndDrink,
    OnlineBoarding,
    SeatComfort,
    InflightEntertainment,
    OnBoardService,
    LegRoom,
    BaggageHandling,
    Checkin,
    InflightService,
    Cleanliness,
}

impl ServiceFeature {
    /// All features in declaration order. Ranking ties fall back to this order.
    pub const ALL: [ServiceFeature; SERVICE_FEATURE_COUNT] = [
        ServiceFeature::InflightWifi,
        ServiceFeature::TimeConvenient,
        ServiceFeature::OnlineBooking,
        ServiceFeature::GateLocation,
        ServiceFeature::FoodAndDrink,
        ServiceFeature::OnlineBoarding,
        ServiceFeature::SeatComfort,
        ServiceFeature::InflightEntertainment,
        ServiceFeature::OnBoardService,
        ServiceFeature::LegRoom,
        ServiceFeature::BaggageHandling,
        ServiceFeature::Checkin,
        ServiceFeature::InflightService,
        ServiceFeature::Cleanliness,
    ];

    /// Column header in the survey export.
    pub fn column(self) -> &'static str {
        match self {
            ServiceFeature::InflightWifi => "Inflight wifi service",
            ServiceFeature::TimeConvenient => "Departure/Arrival time convenient",
            ServiceFeature::OnlineBooking => "Ease of Online booking",
            ServiceFeature::GateLocation => "Gate location",
            ServiceFeature::FoodAndDrink => "Food and drink",
            ServiceFeature::OnlineBoarding => "Online boarding",
            ServiceFeature::SeatComfort => "Seat comfort",
            ServiceFeature::InflightEntertainment => "Inflight entertainment",
            ServiceFeature::OnBoardService => "On-board service",
            ServiceFeature::LegRoom => "Leg room service",
            ServiceFeature::BaggageHandling => "Baggage handling",
            ServiceFeature::Checkin => "Checkin service",
            ServiceFeature::InflightService => "Inflight service",
            ServiceFeature::Cleanliness => "Cleanliness",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ServiceFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Three-way classification of a respondent by satisfaction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SatisfactionGroup {
    Dissatisfied,
    Neutral,
    Satisfied,
}

impl SatisfactionGroup {
    /// Legend order used by every grouped output.
    pub const ALL: [SatisfactionGroup; 3] = [
        SatisfactionGroup::Dissatisfied,
        SatisfactionGroup::Neutral,
        SatisfactionGroup::Satisfied,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SatisfactionGroup::Dissatisfied => "Dissatisfied",
            SatisfactionGroup::Neutral => "Neutral",
            SatisfactionGroup::Satisfied => "Satisfied",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SatisfactionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single survey row deserialized from the source CSV.
///
/// Cells used for derivation are optional here; the enricher rejects rows
/// where they are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: u64,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Customer Type")]
    pub customer_type: String,
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "Type of Travel")]
    pub travel_type: String,
    #[serde(rename = "Class")]
    pub travel_class: String,
    #[serde(rename = "Flight Distance")]
    pub flight_distance: Option<f64>,

    #[serde(rename = "Inflight wifi service")]
    pub inflight_wifi: Option<u8>,
    #[serde(rename = "Departure/Arrival time convenient")]
    pub time_convenient: Option<u8>,
    #[serde(rename = "Ease of Online booking")]
    pub online_booking: Option<u8>,
    #[serde(rename = "Gate location")]
    pub gate_location: Option<u8>,
    #[serde(rename = "Food and drink")]
    pub food_and_drink: Option<u8>,
    #[serde(rename = "Online boarding")]
    pub online_boarding: Option<u8>,
    #[serde(rename = "Seat comfort")]
    pub seat_comfort: Option<u8>,
    #[serde(rename = "Inflight entertainment")]
    pub inflight_entertainment: Option<u8>,
    #[serde(rename = "On-board service")]
    pub on_board_service: Option<u8>,
    #[serde(rename = "Leg room service")]
    pub leg_room: Option<u8>,
    #[serde(rename = "Baggage handling")]
    pub baggage_handling: Option<u8>,
    #[serde(rename = "Checkin service")]
    pub checkin: Option<u8>,
    #[serde(rename = "Inflight service")]
    pub inflight_service: Option<u8>,
    #[serde(rename = "Cleanliness")]
    pub cleanliness: Option<u8>,

    #[serde(rename = "Departure Delay in Minutes")]
    pub departure_delay: Option<f64>,
    #[serde(rename = "Arrival Delay in Minutes")]
    pub arrival_delay: Option<f64>,
    /// Survey's own label; passed through, the score is derived from the ratings.
    pub satisfaction: String,
}

impl RawRecord {
    /// Header names the loader requires to be present.
    pub const REQUIRED_COLUMNS: [&'static str; 22] = [
        "id",
        "Gender",
        "Customer Type",
        "Age",
        "Type of Travel",
        "Class",
        "Flight Distance",
        "Inflight wifi service",
        "Departure/Arrival time convenient",
        "Ease of Online booking",
        "Gate location",
        "Food and drink",
        "Online boarding",
        "Seat comfort",
        "Inflight entertainment",
        "On-board service",
        "Leg room service",
        "Baggage handling",
        "Checkin service",
        "Inflight service",
        "Cleanliness",
        "satisfaction",
    ];

    pub fn rating(&self, feature: ServiceFeature) -> Option<u8> {
        match feature {
            ServiceFeature::InflightWifi => self.inflight_wifi,
            ServiceFeature::TimeConvenient => self.time_convenient,
            ServiceFeature::OnlineBooking => self.online_booking,
            ServiceFeature::GateLocation => self.gate_location,
            ServiceFeature::FoodAndDrink => self.food_and_drink,
            ServiceFeature::OnlineBoarding => self.online_boarding,
            ServiceFeature::SeatComfort => self.seat_comfort,
            ServiceFeature::InflightEntertainment => self.inflight_entertainment,
            ServiceFeature::OnBoardService => self.on_board_service,
            ServiceFeature::LegRoom => self.leg_room,
            ServiceFeature::BaggageHandling => self.baggage_handling,
            ServiceFeature::Checkin => self.checkin,
            ServiceFeature::InflightService => self.inflight_service,
            ServiceFeature::Cleanliness => self.cleanliness,
        }
    }
}

/// Raw rows in source order, as returned by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    pub source: String,
    pub records: Vec<RawRecord>,
}

/// A respondent with its derived fields. Built only by the enricher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    pub raw: RawRecord,
    #[serde(skip)]
    pub ratings: [u8; SERVICE_FEATURE_COUNT],
    #[serde(rename = "Nps")]
    pub score: f64,
    #[serde(rename = "NPSGroup")]
    pub satisfaction_group: SatisfactionGroup,
    #[serde(rename = "AgeGroup")]
    pub age_group: String,
    #[serde(rename = "Flight Distance Group")]
    pub distance_group: String,
}

impl Record {
    pub fn id(&self) -> u64 {
        self.raw.id
    }

    pub fn rating(&self, feature: ServiceFeature) -> u8 {
        self.ratings[feature.index()]
    }
}

/// The enriched, read-only working dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub(crate) records: Vec<Record>,
    pub(crate) age_buckets: BucketSpec,
    pub(crate) distance_buckets: BucketSpec,
}

impl Dataset {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn age_buckets(&self) -> &BucketSpec {
        &self.age_buckets
    }

    pub fn distance_buckets(&self) -> &BucketSpec {
        &self.distance_buckets
    }

    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }
}
