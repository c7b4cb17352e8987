pub mod anthropic_client;
pub mod generation;

pub use anthropic_client::AnthropicClient;
pub use generation::{GenerationError, GenerationRequest, GenerationService};
