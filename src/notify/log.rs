use async_trait::async_trait;
use tracing::info;

use super::error::NotifyResult;
use super::Notifier;

/// [`Notifier`] that only logs, used when no SMS API key is configured.
#[derive(Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, phone: &str, message: &str) -> NotifyResult<()> {
        info!(phone, message, "notification (log only, no SMS key configured)");
        Ok(())
    }
}
