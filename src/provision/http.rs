use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, info};

use super::error::{ProvisionError, ProvisionResult};
use super::{InferenceClient, Provisioner};

#[derive(Serialize)]
struct CreateEndpointRequest<'a> {
    endpoint_name: &'a str,
    model_name: &'a str,
    instance_type: &'a str,
    initial_instance_count: u32,
}

/// [`Provisioner`] that talks to a model-serving control plane over HTTP.
#[derive(Clone)]
pub struct HttpProvisioner {
    client: reqwest::Client,
    base_url: String,
    model_name: String,
    instance_type: String,
}

impl HttpProvisioner {
    pub fn new(
        base_url: impl Into<String>,
        model_name: impl Into<String>,
        instance_type: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
            model_name: model_name.into(),
            instance_type: instance_type.into(),
        }
    }
}

#[async_trait]
impl Provisioner for HttpProvisioner {
    async fn create_endpoint(&self, endpoint_name: &str) -> ProvisionResult<()> {
        let url = format!("{}/endpoints", self.base_url);
        let body = CreateEndpointRequest {
            endpoint_name,
            model_name: &self.model_name,
            instance_type: &self.instance_type,
            initial_instance_count: 1,
        };

        debug!(endpoint = endpoint_name, url = %url, "requesting endpoint deployment");
        let response = self.client.post(&url).json(&body).send().await?;
        check_status(response, endpoint_name).await?;
        info!(endpoint = endpoint_name, "endpoint deployment accepted");
        Ok(())
    }

    async fn delete_endpoint(&self, endpoint_name: &str) -> ProvisionResult<()> {
        let url = format!("{}/endpoints/{}", self.base_url, endpoint_name);

        debug!(endpoint = endpoint_name, url = %url, "requesting endpoint deletion");
        let response = self.client.delete(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProvisionError::EndpointNotFound {
                name: endpoint_name.to_string(),
            });
        }
        check_status(response, endpoint_name).await?;
        info!(endpoint = endpoint_name, "endpoint deletion initiated");
        Ok(())
    }
}

/// [`InferenceClient`] forwarding to the endpoint's invocation route.
#[derive(Clone)]
pub struct HttpInferenceClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInferenceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
        }
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn invoke(
        &self,
        endpoint_name: &str,
        text: &str,
    ) -> ProvisionResult<serde_json::Value> {
        let url = format!("{}/endpoints/{}/invocations", self.base_url, endpoint_name);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await?;
        let response = check_status(response, endpoint_name).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(
    response: reqwest::Response,
    endpoint_name: &str,
) -> ProvisionResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ProvisionError::EndpointNotFound {
            name: endpoint_name.to_string(),
        });
    }
    let message = response.text().await.unwrap_or_default();
    Err(ProvisionError::Upstream {
        status: status.as_u16(),
        message,
    })
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
