use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use super::generation::{GenerationError, GenerationRequest, GenerationService};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Anthropic Messages API client. One request per call, no retries.
#[derive(Clone, Debug)]
pub struct AnthropicClient {
    base_url: String,
    timeout: Duration,
}

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnthropicClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GenerationService for AnthropicClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| {
                GenerationError::Transport(format!("Failed to build HTTP client: {err}"))
            })?;

        let request_url = build_messages_url(&self.base_url);

        debug!(
            target: "trip_planner::anthropic",
            url = %request_url,
            model = request.model(),
            max_tokens = request.max_tokens(),
            prompt_len = request.prompt().len(),
            "sending generation request"
        );

        let response = client
            .post(&request_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request.to_value())
            .send()
            .await
            .map_err(|err| GenerationError::Transport(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| GenerationError::Transport(format!("Failed to read response: {err}")))?;

        debug!(
            target: "trip_planner::anthropic",
            status = status.as_u16(),
            response_len = response_text.len(),
            "received generation response"
        );

        if !status.is_success() {
            let (message, details) = parse_error_body(&response_text);
            error!(
                target: "trip_planner::anthropic",
                status = status.as_u16(),
                error = message.as_deref().unwrap_or("<none>"),
                "generation service returned an error"
            );
            return Err(GenerationError::Upstream {
                status: Some(status.as_u16()),
                message,
                details,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
            GenerationError::MalformedResponse(format!("Failed to parse JSON: {err}"))
        })?;

        extract_generated_text(&response_json)
    }
}

fn build_messages_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/messages") {
        trimmed.to_string()
    } else {
        format!("{}/messages", trimmed)
    }
}

/// Error bodies are untrusted: keep the JSON when it parses, the raw text otherwise.
fn parse_error_body(body: &str) -> (Option<String>, Value) {
    match serde_json::from_str::<Value>(body) {
        Ok(details) => {
            let message = details
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string());
            (message, details)
        }
        Err(_) if body.trim().is_empty() => (None, Value::Null),
        Err(_) => (None, Value::String(body.to_string())),
    }
}

fn extract_generated_text(response: &Value) -> Result<String, GenerationError> {
    let content = response
        .get("content")
        .and_then(|value| value.as_array())
        .ok_or_else(|| {
            GenerationError::MalformedResponse(
                "Missing 'content' array in messages response".to_string(),
            )
        })?;

    let first_block = content.first().ok_or_else(|| {
        GenerationError::MalformedResponse("Messages response contained no content".to_string())
    })?;

    first_block
        .get("text")
        .and_then(|value| value.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            GenerationError::MalformedResponse(
                "First content block has no 'text' field".to_string(),
            )
        })
}
