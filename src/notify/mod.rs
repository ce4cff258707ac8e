//! Outbound readiness notifications.
//!
//! One-way message sends, one per destination. Failures are independent: a
//! rejected or failed send for one subscriber never blocks delivery to the
//! rest.

pub mod error;
pub mod log;
pub mod textbelt;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{NotifyError, NotifyResult};
pub use log::LogNotifier;
pub use textbelt::{DEFAULT_TEXTBELT_URL, TextbeltNotifier};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockNotifier;

use async_trait::async_trait;

/// Sends a one-way message to a destination phone number.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, phone: &str, message: &str) -> NotifyResult<()>;
}
