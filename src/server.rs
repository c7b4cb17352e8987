//! axum adapter around [`ItineraryHandler`].
//!
//! The route accepts every method so the handler's own method gate produces the
//! JSON 405 body instead of axum's empty one.

use std::{any::Any, sync::Arc};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    config::PlannerConfig,
    core::handler::ItineraryHandler,
    error::{ItineraryError, Result},
    types::response::{InboundRequest, ItineraryResponse},
};

pub const ITINERARY_ROUTE: &str = "/api/generate-itinerary";

impl IntoResponse for ItineraryResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        for (name, value) in self.headers {
            response.headers_mut().insert(name, value);
        }
        response
    }
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "trip-planner",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

async fn generate_itinerary(
    State(handler): State<Arc<ItineraryHandler>>,
    method: Method,
    body: Bytes,
) -> ItineraryResponse {
    let body = if body.is_empty() {
        None
    } else {
        match String::from_utf8(body.to_vec()) {
            Ok(text) => Some(text),
            // the method gate still answers first for non-POST requests
            Err(_) if method != Method::POST => None,
            Err(err) => {
                return handler.error_response(ItineraryError::Internal(format!(
                    "request body is not valid UTF-8: {err}"
                )))
            }
        }
    };

    handler.handle(InboundRequest::new(method, body)).await
}

/// Any panic below this layer becomes the same opaque 500 the handler uses.
fn internal_error_on_panic(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("<non-string panic payload>");

    error!(target: "trip_planner::server", panic = detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ItineraryError::Internal(detail.to_string()).to_error_payload()),
    )
        .into_response()
}

pub fn build_router(handler: Arc<ItineraryHandler>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(ITINERARY_ROUTE, any(generate_itinerary))
        .with_state(handler)
        .layer(CatchPanicLayer::custom(internal_error_on_panic))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until ctrl-c
pub async fn serve(config: &PlannerConfig) -> Result<()> {
    let handler = Arc::new(ItineraryHandler::from_config(config));
    if !handler.has_api_key() {
        error!(
            target: "trip_planner::server",
            "ANTHROPIC_API_KEY not found in environment; requests will fail with 500"
        );
    }

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| ItineraryError::Config(format!("failed to bind {addr}: {err}")))?;

    info!(
        target: "trip_planner::server",
        addr = %addr,
        model = handler.model(),
        route = ITINERARY_ROUTE,
        "serving itinerary endpoint"
    );

    axum::serve(listener, build_router(handler))
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await
        .map_err(|err| ItineraryError::Internal(format!("server error: {err}")))
}

/// Resolves once `signal` fires. A signal that cannot be registered never resolves.
async fn shutdown_signal<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        error!(target: "trip_planner::server", error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!(target: "trip_planner::server", "shutting down");
}
