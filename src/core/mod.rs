pub mod extraction;
pub mod handler;
pub mod prompt;
pub mod sanitize;
pub mod validation;

pub use extraction::{extract_json_array, ExtractionStrategy};
pub use handler::{max_tokens_for, ItineraryHandler};
pub use prompt::build_itinerary_prompt;
pub use sanitize::sanitize_destination;
pub use validation::validate_request;
