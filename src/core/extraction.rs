//! Turning free-form generated text into a JSON array.
//!
//! Models are told to return bare JSON but routinely wrap it in markdown fences or a
//! sentence of prose. Strategies are tried in order until one yields an array.

use serde_json::Value;
use tracing::debug;

use crate::error::{ItineraryError, Result};

/// Longest raw excerpt carried in an error body
pub const MAX_EXCERPT_CHARS: usize = 200;

/// One way of pulling a JSON array out of generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// The whole text is the array
    Direct,
    /// First `[` through last `]`, spanning newlines
    BracketSpan,
}

impl ExtractionStrategy {
    pub const ORDER: [ExtractionStrategy; 2] =
        [ExtractionStrategy::Direct, ExtractionStrategy::BracketSpan];

    pub fn name(&self) -> &'static str {
        match self {
            ExtractionStrategy::Direct => "direct",
            ExtractionStrategy::BracketSpan => "bracket_span",
        }
    }

    pub fn apply(&self, text: &str) -> Option<Value> {
        let candidate = match self {
            ExtractionStrategy::Direct => text.trim(),
            ExtractionStrategy::BracketSpan => bracket_span(text)?,
        };

        serde_json::from_str::<Value>(candidate)
            .ok()
            .filter(Value::is_array)
    }
}

/// Extract the itinerary array from generated text.
///
/// Fails with [`ItineraryError::UnparsableResponse`] carrying a bounded excerpt.
pub fn extract_json_array(text: &str) -> Result<Value> {
    for strategy in ExtractionStrategy::ORDER {
        if let Some(value) = strategy.apply(text) {
            debug!(
                target: "trip_planner::extraction",
                strategy = strategy.name(),
                "extracted JSON array from generated text"
            );
            return Ok(value);
        }
    }

    Err(ItineraryError::UnparsableResponse {
        excerpt: excerpt(text),
    })
}

/// Greedy `\[[\s\S]*\]`: first opening bracket to the last closing one.
fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

pub fn excerpt(text: &str) -> String {
    text.chars().take(MAX_EXCERPT_CHARS).collect()
}
