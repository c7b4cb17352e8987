use serde_json::Value;

use crate::{
    core::sanitize::{sanitize_destination, sanitize_interest},
    error::{ItineraryError, Result},
    types::request::{BudgetTier, ItineraryRequest, RawItineraryRequest, TripType},
};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 30;
const MIN_DESTINATION_CHARS: usize = 2;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_DESTINATION: &str = "Invalid destination name";
pub const INVALID_DAYS: &str = "Days must be between 1 and 30";
pub const INVALID_BUDGET: &str = "Invalid budget selection";
pub const INVALID_TRIP_TYPE: &str = "Invalid trip type selection";

/// Apply every rule in order; the first failure wins.
pub fn validate_request(raw: RawItineraryRequest) -> Result<ItineraryRequest> {
    let (Some(destination), Some(days), Some(budget), Some(trip_type)) = (
        present(raw.destination),
        present(raw.days),
        present(raw.budget),
        present(raw.trip_type),
    ) else {
        return Err(ItineraryError::Validation(MISSING_FIELDS.to_string()));
    };

    let destination = destination
        .as_str()
        .map(sanitize_destination)
        .filter(|name| name.chars().count() >= MIN_DESTINATION_CHARS)
        .ok_or_else(|| ItineraryError::Validation(INVALID_DESTINATION.to_string()))?;

    let days = parse_days(&days)
        .filter(|days| (MIN_DAYS..=MAX_DAYS).contains(days))
        .ok_or_else(|| ItineraryError::Validation(INVALID_DAYS.to_string()))?;

    let budget = budget
        .as_str()
        .and_then(BudgetTier::parse)
        .ok_or_else(|| ItineraryError::Validation(INVALID_BUDGET.to_string()))?;

    let trip_type = trip_type
        .as_str()
        .and_then(TripType::parse)
        .ok_or_else(|| ItineraryError::Validation(INVALID_TRIP_TYPE.to_string()))?;

    let interests = raw
        .interests
        .unwrap_or_default()
        .into_iter()
        .map(|interest| sanitize_interest(&interest))
        .filter(|interest| !interest.is_empty())
        .collect();

    Ok(ItineraryRequest {
        destination,
        days,
        budget,
        trip_type,
        interests,
    })
}

/// Drop values a caller would consider "not filled in": null, false, 0 and "".
fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|value| match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Whole numbers only; numeric strings are accepted the way form posts send them.
fn parse_days(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if number.fract() != 0.0 || number < 0.0 || number > u32::MAX as f64 {
        return None;
    }
    Some(number as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(body: Value) -> RawItineraryRequest {
        serde_json::from_value(body).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "destination": "Paris, France",
            "days": 3,
            "budget": "mid-range",
            "tripType": "couple"
        })
    }

    fn message(result: Result<ItineraryRequest>) -> String {
        match result {
            Err(ItineraryError::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_request() {
        let request = validate_request(raw(valid_body())).unwrap();
        assert_eq!(request.destination, "Paris, France");
        assert_eq!(request.days, 3);
        assert_eq!(request.budget, BudgetTier::MidRange);
        assert_eq!(request.trip_type, TripType::Couple);
        assert!(request.interests.is_empty());
    }

    #[test]
    fn each_missing_field_is_rejected() {
        for field in ["destination", "days", "budget", "tripType"] {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(message(validate_request(raw(body))), MISSING_FIELDS, "{field}");
        }
    }

    #[test]
    fn falsy_values_count_as_missing() {
        for (field, value) in [
            ("destination", json!("")),
            ("days", json!(0)),
            ("budget", json!(null)),
            ("tripType", json!(false)),
        ] {
            let mut body = valid_body();
            body[field] = value;
            assert_eq!(message(validate_request(raw(body))), MISSING_FIELDS, "{field}");
        }
    }

    #[test]
    fn missing_fields_win_over_other_errors() {
        let body = json!({ "destination": "<", "days": 99, "budget": "cheap" });
        assert_eq!(message(validate_request(raw(body))), MISSING_FIELDS);
    }

    #[test]
    fn short_or_empty_destination_after_sanitizing_is_rejected() {
        for destination in [json!("  <>  "), json!("X"), json!(" [a] "), json!(42)] {
            let mut body = valid_body();
            body["destination"] = destination;
            assert_eq!(message(validate_request(raw(body))), INVALID_DESTINATION);
        }
    }

    #[test]
    fn days_bounds_are_inclusive() {
        for days in MIN_DAYS..=MAX_DAYS {
            let mut body = valid_body();
            body["days"] = json!(days);
            assert_eq!(validate_request(raw(body)).unwrap().days, days);
        }

        for days in [json!(-1), json!(31), json!(45), json!(2.5), json!("ten"), json!([3])] {
            let mut body = valid_body();
            body["days"] = days;
            assert_eq!(message(validate_request(raw(body))), INVALID_DAYS);
        }
    }

    #[test]
    fn numeric_day_strings_are_accepted() {
        let mut body = valid_body();
        body["days"] = json!("7");
        assert_eq!(validate_request(raw(body)).unwrap().days, 7);

        let mut body = valid_body();
        body["days"] = json!(5.0);
        assert_eq!(validate_request(raw(body)).unwrap().days, 5);
    }

    #[test]
    fn unknown_enums_are_rejected() {
        let mut body = valid_body();
        body["budget"] = json!("cheap");
        assert_eq!(message(validate_request(raw(body))), INVALID_BUDGET);

        let mut body = valid_body();
        body["tripType"] = json!("business");
        assert_eq!(message(validate_request(raw(body))), INVALID_TRIP_TYPE);
    }

    #[test]
    fn interests_are_sanitized_and_empties_dropped() {
        let mut body = valid_body();
        body["interests"] = json!([" food ", "<>", "art{s}", ""]);
        let request = validate_request(raw(body)).unwrap();
        assert_eq!(request.interests, vec!["food", "arts"]);
    }
}
