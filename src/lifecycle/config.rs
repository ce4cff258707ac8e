use std::time::Duration;

/// Default idle window before the endpoint is torn down.
pub const DEFAULT_IDLE_WINDOW_SECS: u64 = 30 * 60;
/// Default remaining-budget threshold below which usage triggers an extension.
pub const DEFAULT_EXTEND_THRESHOLD_SECS: u64 = 15 * 60;

/// Tunables for the lifecycle coordinator.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Key of the single service record this coordinator manages.
    pub model_id: String,
    /// Prefix for generated endpoint names.
    pub endpoint_prefix: String,
    /// Idle window armed on readiness and re-armed on every extension.
    pub idle_window: Duration,
    /// Extend the timer once less than this much budget remains.
    pub extend_threshold: Duration,
    /// App URL included in readiness notifications.
    pub app_url: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            model_id: "sentiment-model".to_string(),
            endpoint_prefix: "sentiment-endpoint".to_string(),
            idle_window: Duration::from_secs(DEFAULT_IDLE_WINDOW_SECS),
            extend_threshold: Duration::from_secs(DEFAULT_EXTEND_THRESHOLD_SECS),
            app_url: "http://localhost:8080".to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Idle window in whole minutes, for user-facing messages.
    pub fn idle_window_minutes(&self) -> u64 {
        self.idle_window.as_secs() / 60
    }
}
