use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::lifecycle::LifecycleError;

use super::payload::ErrorResponse;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("model is not currently running or available")]
    NotAvailable,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            GatewayError::MissingField(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            GatewayError::NotAvailable | GatewayError::Lifecycle(LifecycleError::NotAvailable) => (
                StatusCode::NOT_FOUND,
                "Model is not currently running or available.".to_string(),
            ),
            GatewayError::Lifecycle(LifecycleError::Provision(e)) => {
                tracing::error!(error = %e, "upstream provisioning failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream provisioning request failed.".to_string(),
                )
            }
            GatewayError::Lifecycle(e) => {
                tracing::error!(error = %e, "internal lifecycle failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
