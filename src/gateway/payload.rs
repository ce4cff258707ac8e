//! Wire types for the gateway routes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
}

#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    pub text: Option<String>,
}

/// Inbound readiness signal from the provisioner.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyEvent {
    pub endpoint_name: String,
}

/// Inbound fired-timer signal from the scheduler.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShutdownEvent {
    pub endpoint_name: String,
}

/// Inbound asynchronous timer-extension trigger.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtendEvent {
    pub schedule_name: String,
    pub endpoint_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}
