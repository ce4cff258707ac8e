use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ProvisionError, ProvisionResult};
use super::{InferenceClient, Provisioner};

/// Recording [`Provisioner`] for tests.
///
/// Tracks every create call and keeps a live set so that deleting an unknown
/// or already-deleted endpoint surfaces `EndpointNotFound`, matching the real
/// control plane.
#[derive(Default)]
pub struct MockProvisioner {
    created: Mutex<Vec<String>>,
    live: Mutex<HashSet<String>>,
    deleted: Mutex<Vec<String>>,
    fail_create: Mutex<bool>,
}

impl MockProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().len()
    }

    pub fn created_names(&self) -> Vec<String> {
        self.created.lock().clone()
    }

    pub fn deleted_names(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }

    pub fn set_fail_create(&self, fail: bool) {
        *self.fail_create.lock() = fail;
    }
}

#[async_trait]
impl Provisioner for MockProvisioner {
    async fn create_endpoint(&self, endpoint_name: &str) -> ProvisionResult<()> {
        if *self.fail_create.lock() {
            return Err(ProvisionError::Upstream {
                status: 500,
                message: "injected create failure".to_string(),
            });
        }
        self.created.lock().push(endpoint_name.to_string());
        self.live.lock().insert(endpoint_name.to_string());
        Ok(())
    }

    async fn delete_endpoint(&self, endpoint_name: &str) -> ProvisionResult<()> {
        self.deleted.lock().push(endpoint_name.to_string());
        if !self.live.lock().remove(endpoint_name) {
            return Err(ProvisionError::EndpointNotFound {
                name: endpoint_name.to_string(),
            });
        }
        Ok(())
    }
}

/// Canned [`InferenceClient`] echoing the input back with a fixed label.
#[derive(Default)]
pub struct MockInferenceClient {
    invocations: Mutex<Vec<(String, String)>>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> Vec<(String, String)> {
        self.invocations.lock().clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn invoke(
        &self,
        endpoint_name: &str,
        text: &str,
    ) -> ProvisionResult<serde_json::Value> {
        self.invocations
            .lock()
            .push((endpoint_name.to_string(), text.to_string()));
        Ok(serde_json::json!([{ "label": "POSITIVE", "score": 0.98, "inputs": text }]))
    }
}
