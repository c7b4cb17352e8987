use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Inbound body exactly as the caller sent it.
///
/// Required fields stay loosely typed so validation can tell "missing" apart from
/// "present but wrong" and report the right message in the right order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItineraryRequest {
    #[serde(default)]
    pub destination: Option<Value>,
    #[serde(default)]
    pub days: Option<Value>,
    #[serde(default)]
    pub budget: Option<Value>,
    #[serde(default)]
    pub trip_type: Option<Value>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

/// Accommodation and dining tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetTier {
    Budget,
    MidRange,
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::MidRange, BudgetTier::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget",
            BudgetTier::MidRange => "mid-range",
            BudgetTier::Luxury => "luxury",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.as_str() == value)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Solo,
    Couple,
    Family,
    Friends,
}

impl TripType {
    pub const ALL: [TripType; 4] = [
        TripType::Solo,
        TripType::Couple,
        TripType::Family,
        TripType::Friends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::Solo => "solo",
            TripType::Couple => "couple",
            TripType::Family => "family",
            TripType::Friends => "friends",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that passed every validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    /// Sanitized destination, 2 to 200 characters
    pub destination: String,
    /// Trip length, 1 to 30
    pub days: u32,
    pub budget: BudgetTier,
    pub trip_type: TripType,
    /// Sanitized interests in caller order, empties removed
    pub interests: Vec<String>,
}
