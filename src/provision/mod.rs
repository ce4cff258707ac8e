//! Compute-resource provisioning boundary.
//!
//! Create is asynchronous: the endpoint becomes ready later and readiness
//! arrives as an out-of-band event on the gateway. Delete is best-effort
//! idempotent; an already-absent endpoint surfaces as
//! [`ProvisionError::EndpointNotFound`] and callers treat it as success.

pub mod error;
pub mod http;
pub mod local;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{ProvisionError, ProvisionResult};
pub use http::{HttpInferenceClient, HttpProvisioner};
pub use local::{LocalInferenceClient, LocalProvisioner};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockInferenceClient, MockProvisioner};

use async_trait::async_trait;

/// Creates and deletes the on-demand inference endpoint.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Begins deployment of a new endpoint. Returns once the deployment is
    /// accepted, not once the endpoint is ready.
    async fn create_endpoint(&self, endpoint_name: &str) -> ProvisionResult<()>;

    /// Tears the endpoint down. [`ProvisionError::EndpointNotFound`] when it
    /// is already gone.
    async fn delete_endpoint(&self, endpoint_name: &str) -> ProvisionResult<()>;
}

/// Forwards inference calls to a live endpoint.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends `text` to the endpoint and returns its JSON result verbatim.
    async fn invoke(&self, endpoint_name: &str, text: &str)
    -> ProvisionResult<serde_json::Value>;
}
