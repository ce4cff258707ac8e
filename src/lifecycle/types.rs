use chrono::{DateTime, Utc};

use crate::store::EndpointStatus;

/// Result of a start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The endpoint is already serving; nothing was mutated.
    AlreadyRunning,
    /// This caller won the start race and kicked off deployment.
    DeploymentStarted { endpoint_name: String },
    /// Deployment was already underway; the caller was added to the
    /// subscriber list.
    Subscribed,
    /// The service is mid-teardown; retry later.
    Unavailable { status: EndpointStatus },
}

/// Result of an idle-timer extension attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendOutcome {
    Extended { fire_at: DateTime<Utc> },
    /// The schedule already fired; shutdown is done or in flight.
    ScheduleGone,
}

/// Result of a usage-signal keep-alive check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAliveCheck {
    pub running: bool,
    /// An asynchronous timer extension was dispatched by this check.
    pub extension_triggered: bool,
}
