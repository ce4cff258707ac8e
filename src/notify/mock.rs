use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{NotifyError, NotifyResult};
use super::Notifier;

/// Recording [`Notifier`] with per-destination failure injection.
#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail_for: Mutex<HashSet<String>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(phone, message)` pairs in delivery order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    /// Makes every send to `phone` fail.
    pub fn fail_for(&self, phone: &str) {
        self.fail_for.lock().insert(phone.to_string());
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, phone: &str, message: &str) -> NotifyResult<()> {
        if self.fail_for.lock().contains(phone) {
            return Err(NotifyError::Rejected(format!(
                "injected failure for {phone}"
            )));
        }
        self.sent
            .lock()
            .push((phone.to_string(), message.to_string()));
        Ok(())
    }
}
