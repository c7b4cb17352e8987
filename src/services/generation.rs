//! Narrow seam around the external text-generation service.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

/// Failure reported by a generation backend
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    /// Non-2xx reply from the service, with whatever diagnostics it returned
    #[error("generation service returned {}: {}", .status.map(|s| s.to_string()).unwrap_or_else(|| "an error".to_string()), .message.as_deref().unwrap_or("no message"))]
    Upstream {
        status: Option<u16>,
        message: Option<String>,
        details: Value,
    },

    #[error("transport failure: {0}")]
    Transport(String),

    /// A 2xx reply that does not carry generated text where it should
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// One generation call: model, output budget and a single user prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    model: String,
    max_tokens: u32,
    prompt: String,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: 1024,
            prompt: prompt.into(),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Messages API request body
    pub fn to_value(&self) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": self.prompt,
                }
            ],
        })
    }
}

/// Anything that can turn a prompt into generated text.
///
/// The credential is passed per call; implementations never read the environment.
#[async_trait]
pub trait GenerationService: Send + Sync + std::fmt::Debug {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError>;
}
