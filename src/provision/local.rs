use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ProvisionError, ProvisionResult};
use super::{InferenceClient, Provisioner};
use tracing::info;

/// Local [`Provisioner`] used when no control plane is configured.
///
/// Deploys nothing; it only tracks names so the lifecycle protocol can be
/// exercised end to end (readiness is driven by posting the ready event to
/// the gateway, as the real control plane would).
#[derive(Default)]
pub struct LocalProvisioner {
    live: Mutex<HashSet<String>>,
}

impl LocalProvisioner {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Provisioner for LocalProvisioner {
    async fn create_endpoint(&self, endpoint_name: &str) -> ProvisionResult<()> {
        info!(endpoint = endpoint_name, "local mode: pretending to deploy endpoint");
        self.live.lock().insert(endpoint_name.to_string());
        Ok(())
    }

    async fn delete_endpoint(&self, endpoint_name: &str) -> ProvisionResult<()> {
        if !self.live.lock().remove(endpoint_name) {
            return Err(ProvisionError::EndpointNotFound {
                name: endpoint_name.to_string(),
            });
        }
        info!(endpoint = endpoint_name, "local mode: pretending to delete endpoint");
        Ok(())
    }
}

/// Local [`InferenceClient`] returning a canned result.
#[derive(Default, Clone)]
pub struct LocalInferenceClient;

impl LocalInferenceClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InferenceClient for LocalInferenceClient {
    async fn invoke(
        &self,
        endpoint_name: &str,
        text: &str,
    ) -> ProvisionResult<serde_json::Value> {
        info!(endpoint = endpoint_name, "local mode: returning canned inference result");
        Ok(serde_json::json!([{ "label": "NEUTRAL", "score": 0.5, "inputs": text }]))
    }
}
