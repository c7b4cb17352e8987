use crate::types::request::{BudgetTier, ItineraryRequest, TripType};

/// Output shape the model is asked to follow
const OUTPUT_SHAPE: &str = r#"[
  {
    "day": 1,
    "title": "Day 1 - Brief Title",
    "hotel": "Hotel Name (3★)",
    "activities": [
      {"when": "Morning", "what": "Activity", "notes": "Brief tip"}
    ]
  }
]"#;

pub fn budget_description(budget: BudgetTier) -> &'static str {
    match budget {
        BudgetTier::Budget => "budget-friendly accommodations and meals",
        BudgetTier::MidRange => {
            "comfortable 3-4 star hotels and a mix of local and nicer restaurants"
        }
        BudgetTier::Luxury => "5-star hotels, fine dining, and premium experiences",
    }
}

pub fn trip_type_description(trip_type: TripType) -> &'static str {
    match trip_type {
        TripType::Solo => "solo traveler with flexible pacing",
        TripType::Couple => "couple seeking romantic and memorable experiences",
        TripType::Family => {
            "family with children, requiring family-friendly activities and moderate pacing"
        }
        TripType::Friends => "group of friends looking for fun and social activities",
    }
}

/// Adjective for the leading interest, if it has one.
pub fn interest_prefix(interest: &str) -> Option<&'static str> {
    match interest.trim().to_lowercase().as_str() {
        "food" | "cuisine" | "culinary" => Some("Culinary"),
        "adventure" => Some("Adventure-focused"),
        "culture" => Some("Culture-rich"),
        "history" => Some("History-focused"),
        "nature" => Some("Nature-focused"),
        "art" | "arts" => Some("Art-focused"),
        "nightlife" => Some("Nightlife-focused"),
        "relaxation" => Some("Relaxing"),
        "beach" | "beaches" => Some("Beach-focused"),
        "shopping" => Some("Shopping-focused"),
        _ => None,
    }
}

/// Build the single user message sent to the generation service
pub fn build_itinerary_prompt(request: &ItineraryRequest) -> String {
    let trip_kind = match request.interests.first().and_then(|first| interest_prefix(first)) {
        Some(prefix) => format!("{prefix} travel itinerary"),
        None => "travel itinerary".to_string(),
    };

    let interests_text = if request.interests.is_empty() {
        String::new()
    } else {
        format!(
            "Focus on these interests: {}.",
            request.interests.join(", ")
        )
    };

    format!(
        "Create a {days}-day {trip_kind} for {destination}.\n\n\
         Trip: {budget}, {trip_type}. {interests_text}\n\n\
         Return ONLY a JSON array (no markdown, no explanations):\n\
         {OUTPUT_SHAPE}\n\n\
         Include exactly {days} day objects. \
         Keep it concise: 3-4 activities per day, short descriptions.",
        days = request.days,
        destination = request.destination,
        budget = budget_description(request.budget),
        trip_type = trip_type_description(request.trip_type),
    )
}
