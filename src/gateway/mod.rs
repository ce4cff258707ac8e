//! HTTP gateway (Axum) for the lifecycle coordinator.
//!
//! Public routes carry the request surface (start, status, invoke); the
//! `/internal/events/*` routes are the inbound signals from the provisioner
//! and the scheduler. This module is primarily used by the `standby` server
//! binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    extend_event_handler, invoke_handler, ready_event_handler, shutdown_event_handler,
    start_handler, status_handler,
};
pub use state::HandlerState;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/v1/service/start", post(start_handler))
        .route("/v1/service/status", get(status_handler))
        .route("/v1/invoke", post(invoke_handler))
        .route("/internal/events/endpoint-ready", post(ready_event_handler))
        .route("/internal/events/shutdown", post(shutdown_event_handler))
        .route("/internal/events/extend", post(extend_event_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
