use std::sync::Arc;

use http::Method;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    config::{PlannerConfig, DEFAULT_MAX_TOKENS_CAP, DEFAULT_MODEL},
    core::{
        extraction::extract_json_array, prompt::build_itinerary_prompt,
        validation::validate_request,
    },
    error::{ItineraryError, Result},
    schemas::{validate_structured_payload, CompletionSchema},
    services::{AnthropicClient, GenerationRequest, GenerationService},
    types::{
        itinerary::Itinerary,
        request::RawItineraryRequest,
        response::{InboundRequest, ItineraryResponse},
    },
};

const BASE_OUTPUT_TOKENS: u32 = 1024;
const OUTPUT_TOKENS_PER_DAY: u32 = 512;

/// Output budget for a trip: grows with the day count, bounded by `cap`.
pub fn max_tokens_for(days: u32, cap: u32) -> u32 {
    BASE_OUTPUT_TOKENS
        .saturating_add(days.saturating_mul(OUTPUT_TOKENS_PER_DAY))
        .min(cap)
}

/// Stateless itinerary endpoint: one request in, one response out
#[derive(Clone)]
pub struct ItineraryHandler {
    generator: Arc<dyn GenerationService>,
    api_key: Option<String>,
    model: String,
    max_tokens_cap: u32,
}

impl std::fmt::Debug for ItineraryHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItineraryHandler")
            .field("generator", &self.generator)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens_cap", &self.max_tokens_cap)
            .finish()
    }
}

impl ItineraryHandler {
    pub fn new(generator: Arc<dyn GenerationService>, api_key: Option<String>) -> Self {
        Self {
            generator,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            max_tokens_cap: DEFAULT_MAX_TOKENS_CAP,
        }
    }

    /// Handler backed by the Anthropic client described by `config`
    pub fn from_config(config: &PlannerConfig) -> Self {
        let client = AnthropicClient::new()
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout);

        Self::new(Arc::new(client), config.api_key.clone())
            .with_model(config.model.clone())
            .with_max_tokens_cap(config.max_tokens_cap)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens_cap(mut self, cap: u32) -> Self {
        self.max_tokens_cap = cap;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run the whole pipeline. Never fails: every error becomes a response.
    pub async fn handle(&self, request: InboundRequest) -> ItineraryResponse {
        match self.process(request).await {
            Ok(response) => response,
            Err(err) => self.error_response(err),
        }
    }

    async fn process(&self, request: InboundRequest) -> Result<ItineraryResponse> {
        if request.method != Method::POST {
            return Err(ItineraryError::MethodNotAllowed);
        }

        let body = request
            .body
            .ok_or_else(|| ItineraryError::Internal("request body is missing".to_string()))?;
        let raw = parse_body(&body)?;

        let validated = validate_request(raw)?;
        let prompt = build_itinerary_prompt(&validated);

        let api_key = self.api_key.as_deref().ok_or(ItineraryError::MissingApiKey)?;

        let generation = GenerationRequest::new(self.model.clone(), prompt)
            .with_max_tokens(max_tokens_for(validated.days, self.max_tokens_cap));

        info!(
            target: "trip_planner::handler",
            destination = %validated.destination,
            days = validated.days,
            budget = %validated.budget,
            trip_type = %validated.trip_type,
            model = %self.model,
            max_tokens = generation.max_tokens(),
            "generating itinerary"
        );

        let text = self.generator.generate(api_key, &generation).await?;
        let itinerary = extract_json_array(&text)?;
        ensure_itinerary_shape(&itinerary)?;

        let generated_days = itinerary.as_array().map_or(0, Vec::len);
        if generated_days != validated.days as usize {
            warn!(
                target: "trip_planner::handler",
                requested = validated.days,
                generated = generated_days,
                "generated day count differs from request"
            );
        }

        info!(
            target: "trip_planner::handler",
            destination = %validated.destination,
            days = generated_days,
            "itinerary generated"
        );

        Ok(ItineraryResponse::success(itinerary))
    }

    /// Log `err` and render it the way the pipeline renders its own failures
    pub fn error_response(&self, err: ItineraryError) -> ItineraryResponse {
        let status = err.status_code();
        match &err {
            ItineraryError::MethodNotAllowed | ItineraryError::Validation(_) => warn!(
                target: "trip_planner::handler",
                status = status.as_u16(),
                code = err.error_code(),
                error = %err,
                "rejected request"
            ),
            ItineraryError::UnparsableResponse { excerpt } => error!(
                target: "trip_planner::handler",
                status = status.as_u16(),
                code = err.error_code(),
                raw = %excerpt,
                "failed to parse generated itinerary"
            ),
            _ => error!(
                target: "trip_planner::handler",
                status = status.as_u16(),
                code = err.error_code(),
                error = %err,
                "itinerary request failed"
            ),
        }

        ItineraryResponse::new(status, err.to_error_payload())
    }
}

/// The body must be a JSON object; serde alone would also read an array by position.
fn parse_body(body: &str) -> Result<RawItineraryRequest> {
    match serde_json::from_str::<Value>(body)? {
        fields @ Value::Object(_) => Ok(serde_json::from_value(fields)?),
        other => Err(ItineraryError::Internal(format!(
            "request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Non-empty array whose entries are well-formed day records
fn ensure_itinerary_shape(itinerary: &Value) -> Result<()> {
    match itinerary.as_array() {
        Some(days) if !days.is_empty() => {}
        _ => {
            return Err(ItineraryError::InvalidFormat(
                "expected a non-empty array of day objects".to_string(),
            ))
        }
    }

    validate_structured_payload(Itinerary::schema(), itinerary)
}
