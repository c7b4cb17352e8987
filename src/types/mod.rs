pub mod itinerary;
pub mod request;
pub mod response;

pub use itinerary::{Activity, Itinerary, ItineraryDay};
pub use request::{BudgetTier, ItineraryRequest, RawItineraryRequest, TripType};
pub use response::{InboundRequest, ItineraryResponse};
