use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::error::{NotifyError, NotifyResult};
use super::Notifier;

/// Default Textbelt SMS API endpoint.
pub const DEFAULT_TEXTBELT_URL: &str = "https://textbelt.com/text";

#[derive(Deserialize)]
struct TextbeltResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// SMS [`Notifier`] backed by the Textbelt HTTP API.
#[derive(Clone)]
pub struct TextbeltNotifier {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl TextbeltNotifier {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_url(DEFAULT_TEXTBELT_URL, api_key)
    }

    pub fn with_url(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Notifier for TextbeltNotifier {
    async fn send(&self, phone: &str, message: &str) -> NotifyResult<()> {
        let response = self
            .client
            .post(&self.url)
            .form(&[
                ("phone", phone),
                ("message", message),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: TextbeltResponse = response.json().await?;
        if !body.success {
            return Err(NotifyError::Rejected(
                body.error.unwrap_or_else(|| "unspecified".to_string()),
            ));
        }

        info!(phone, "sent readiness SMS");
        Ok(())
    }
}
