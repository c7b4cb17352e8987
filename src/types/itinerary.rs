use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Result,
    schemas::{deserialize_structured_response, CompletionSchema, SchemaHandle},
};

/// Day-by-day itinerary returned by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Itinerary(pub Vec<ItineraryDay>);

/// One day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryDay {
    /// 1-based day counter within the itinerary
    #[schemars(range(min = 1))]
    pub day: u32,
    /// Short theme for the day (e.g. "Day 1 - Old Town")
    pub title: String,
    /// Where the travellers sleep that night
    pub hotel: String,
    /// Planned activities in chronological order
    pub activities: Vec<Activity>,
}

/// A single slot in a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Activity {
    /// Time of day, e.g. "Morning", "Afternoon", "Evening"
    pub when: String,
    pub what: String,
    #[serde(default)]
    pub notes: String,
}

impl Itinerary {
    /// Typed view over an extracted JSON value, with the failing path in the error.
    pub fn from_value(value: &Value) -> Result<Self> {
        deserialize_structured_response::<Self>(value, Self::schema())
    }

    pub fn days(&self) -> &[ItineraryDay] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl CompletionSchema for Itinerary {
    fn schema() -> &'static SchemaHandle {
        static HANDLE: std::sync::OnceLock<SchemaHandle> = std::sync::OnceLock::new();
        HANDLE.get_or_init(|| {
            SchemaHandle::from_root_schema::<Self>("Itinerary", schemars::schema_for!(Self))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_reads_generated_days() {
        let value = json!([
            {
                "day": 1,
                "title": "Day 1 - Arrival",
                "hotel": "Hotel Lumen (3★)",
                "activities": [
                    {"when": "Morning", "what": "Check in", "notes": "Drop bags early"},
                    {"when": "Evening", "what": "River walk"}
                ]
            }
        ]);

        let itinerary = Itinerary::from_value(&value).unwrap();
        assert_eq!(itinerary.len(), 1);
        assert_eq!(itinerary.days()[0].activities[1].notes, "");
    }

    #[test]
    fn from_value_reports_failing_path() {
        let value = json!([{ "day": 1, "title": "x", "hotel": "y", "activities": [{"when": "Morning"}] }]);
        let err = Itinerary::from_value(&value).unwrap_err().to_string();
        assert!(err.contains("[0].activities[0]"), "unexpected error: {err}");
    }
}
