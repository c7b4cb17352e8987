use http::{header, HeaderValue, Method, StatusCode};
use serde_json::{json, Value};

/// HTTP-style inbound request handed to the handler by whatever hosts it
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub body: Option<String>,
}

impl InboundRequest {
    pub fn new(method: Method, body: Option<String>) -> Self {
        Self { method, body }
    }

    /// POST with a JSON body
    pub fn post_json(body: &Value) -> Self {
        Self::new(Method::POST, Some(body.to_string()))
    }
}

/// HTTP-style response: status, headers and a JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryResponse {
    pub status: StatusCode,
    pub headers: Vec<(header::HeaderName, HeaderValue)>,
    pub body: Value,
}

impl ItineraryResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
        }
    }

    /// 200 carrying the itinerary exactly as extracted
    pub fn success(itinerary: Value) -> Self {
        Self::new(StatusCode::OK, json!({ "itinerary": itinerary })).with_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )
    }

    pub fn with_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn header(&self, name: &header::HeaderName) -> Option<&HeaderValue> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(|value| value.as_str())
    }
}
