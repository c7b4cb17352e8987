pub mod schema;
pub mod validation;

pub use schema::{CompletionSchema, SchemaHandle};
pub use validation::{deserialize_structured_response, validate_structured_payload};
