use http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::services::generation::GenerationError;

/// Main error type for the itinerary pipeline
#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
        details: Value,
    },

    #[error("Failed to parse itinerary response")]
    UnparsableResponse { excerpt: String },

    #[error("Invalid itinerary format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ItineraryError>;

const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to generate itinerary";

impl ItineraryError {
    /// HTTP status the caller sees for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ItineraryError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ItineraryError::Validation(_) => StatusCode::BAD_REQUEST,
            ItineraryError::Upstream { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(|code| !code.is_success())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for structured logs
    pub fn error_code(&self) -> &'static str {
        match self {
            ItineraryError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ItineraryError::Validation(_) => "VALIDATION_ERROR",
            ItineraryError::MissingApiKey => "MISSING_API_KEY",
            ItineraryError::Config(_) => "CONFIG_ERROR",
            ItineraryError::Upstream { .. } => "UPSTREAM_ERROR",
            ItineraryError::UnparsableResponse { .. } => "UNPARSABLE_RESPONSE",
            ItineraryError::InvalidFormat(_) => "INVALID_ITINERARY_FORMAT",
            ItineraryError::Serialization(_) => "SERIALIZATION_ERROR",
            ItineraryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error belongs to the opaque internal-fault class
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ItineraryError::Serialization(_)
                | ItineraryError::Internal(_)
                | ItineraryError::Config(_)
        )
    }

    /// Convert to the JSON body returned to the caller.
    ///
    /// Internal faults collapse to a generic message so no exception detail leaks.
    pub fn to_error_payload(&self) -> Value {
        match self {
            ItineraryError::MethodNotAllowed => json!({ "error": "Method not allowed" }),
            ItineraryError::Validation(message) => json!({ "error": message }),
            ItineraryError::MissingApiKey => json!({ "error": "API key not configured" }),
            ItineraryError::Upstream {
                message, details, ..
            } => json!({
                "error": message,
                "details": details,
            }),
            ItineraryError::UnparsableResponse { excerpt } => json!({
                "error": "Failed to parse itinerary response",
                "raw": excerpt,
            }),
            ItineraryError::InvalidFormat(details) => json!({
                "error": "Invalid itinerary format",
                "details": details,
            }),
            ItineraryError::Serialization(_)
            | ItineraryError::Internal(_)
            | ItineraryError::Config(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl From<GenerationError> for ItineraryError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Upstream {
                status,
                message,
                details,
            } => ItineraryError::Upstream {
                status,
                message: message.unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string()),
                details,
            },
            GenerationError::Transport(message) => {
                ItineraryError::Internal(format!("generation transport failed: {message}"))
            }
            GenerationError::MalformedResponse(message) => {
                ItineraryError::Internal(format!("unexpected generation response: {message}"))
            }
        }
    }
}
