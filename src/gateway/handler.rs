use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::lifecycle::StartOutcome;

use super::error::GatewayError;
use super::payload::{
    ExtendEvent, InvokeRequest, ReadyEvent, ShutdownEvent, StartRequest, StartResponse,
    StatusResponse,
};
use super::state::HandlerState;

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, GatewayError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(GatewayError::MissingField(field))
}

#[instrument(skip(state, request))]
pub async fn start_handler(
    State(state): State<HandlerState>,
    Json(request): Json<StartRequest>,
) -> Result<Response, GatewayError> {
    let name = required(&request.name, "name")?;
    let phone = required(&request.phone, "phone")?;

    let outcome = state.coordinator.request_start(name, phone).await?;
    let (status, message) = match outcome {
        StartOutcome::AlreadyRunning => (
            StatusCode::OK,
            "Model is already running and ready for analysis.".to_string(),
        ),
        StartOutcome::DeploymentStarted { .. } => (
            StatusCode::OK,
            "Model deployment started. You will receive an SMS when it is ready.".to_string(),
        ),
        StartOutcome::Subscribed => (
            StatusCode::OK,
            "Model is starting up. You will receive an SMS when it is ready.".to_string(),
        ),
        StartOutcome::Unavailable { status } => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Model is in an unavailable state: {status}. Please try again later."),
        ),
    };

    Ok((status, Json(StartResponse { message })).into_response())
}

/// Status poll. Reports whether the endpoint is running and, as a side
/// effect, runs the keep-alive check against the idle timer.
#[instrument(skip(state))]
pub async fn status_handler(
    State(state): State<HandlerState>,
) -> Result<Json<StatusResponse>, GatewayError> {
    let check = state.coordinator.check_usage().await?;
    Ok(Json(StatusResponse {
        running: check.running,
    }))
}

/// Inference proxy. Same keep-alive side effect as the status poll, then
/// forwards the text and returns the model's result verbatim.
#[instrument(skip(state, request))]
pub async fn invoke_handler(
    State(state): State<HandlerState>,
    Json(request): Json<InvokeRequest>,
) -> Result<Json<serde_json::Value>, GatewayError> {
    let text = required(&request.text, "text")?;
    let result = state.coordinator.invoke(text).await?;
    Ok(Json(result))
}

#[instrument(skip(state))]
pub async fn ready_event_handler(
    State(state): State<HandlerState>,
    Json(event): Json<ReadyEvent>,
) -> Result<StatusCode, GatewayError> {
    state.coordinator.handle_ready(&event.endpoint_name).await?;
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
pub async fn shutdown_event_handler(
    State(state): State<HandlerState>,
    Json(event): Json<ShutdownEvent>,
) -> Result<StatusCode, GatewayError> {
    state
        .coordinator
        .handle_shutdown(&event.endpoint_name)
        .await?;
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
pub async fn extend_event_handler(
    State(state): State<HandlerState>,
    Json(event): Json<ExtendEvent>,
) -> Result<StatusCode, GatewayError> {
    state
        .coordinator
        .extend_timer(&event.schedule_name, &event.endpoint_name)
        .await?;
    Ok(StatusCode::OK)
}
