//! trip-planner-rs: day-by-day travel itineraries from the Anthropic Messages API
//!
//! A single stateless endpoint validates a trip request, builds a prompt, asks the
//! generation service for an itinerary and hands back the JSON array it returns.
//! The pipeline lives in [`ItineraryHandler`]; [`server`] wraps it in an axum router.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use trip_planner_rs::{InboundRequest, ItineraryHandler, PlannerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlannerConfig::from_env()?;
//!     let handler = ItineraryHandler::from_config(&config);
//!
//!     let request = InboundRequest::post_json(&json!({
//!         "destination": "Paris, France",
//!         "days": 3,
//!         "budget": "mid-range",
//!         "tripType": "couple",
//!         "interests": ["food", "art"]
//!     }));
//!
//!     let response = handler.handle(request).await;
//!     println!("{} {}", response.status, response.body);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod server;
pub mod services;
pub mod types;

pub use config::PlannerConfig;
pub use self::core::{
    build_itinerary_prompt, extract_json_array, max_tokens_for, sanitize_destination,
    validate_request, ExtractionStrategy, ItineraryHandler,
};
pub use error::{ItineraryError, Result};
pub use schemas::{
    deserialize_structured_response, validate_structured_payload, CompletionSchema,
    SchemaHandle,
};
pub use server::build_router;
pub use services::{AnthropicClient, GenerationError, GenerationRequest, GenerationService};
pub use types::{
    Activity, BudgetTier, InboundRequest, Itinerary, ItineraryDay, ItineraryRequest,
    ItineraryResponse, RawItineraryRequest, TripType,
};

#[cfg(feature = "cli")]
pub mod cli;
