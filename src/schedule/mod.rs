//! One-shot idle-timer scheduling boundary.
//!
//! At most one schedule exists per endpoint at any time. A schedule fires
//! once, invoking the shutdown path with its payload, and deletes itself on
//! fire. Rescheduling replaces the fire time in place; there is no cancel
//! path (the timer can only be deferred, never canceled short of the
//! endpoint being torn down).

pub mod error;
pub mod local;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use local::LocalScheduler;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockScheduler;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque payload handed to the shutdown action when the timer fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePayload {
    pub endpoint_name: String,
}

/// A single future-time trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub name: String,
    pub fire_at: DateTime<Utc>,
    pub payload: SchedulePayload,
}

impl Schedule {
    /// Conventional schedule name for an endpoint's shutdown timer.
    pub fn shutdown_name(endpoint_name: &str) -> String {
        format!("shutdown-schedule-{endpoint_name}")
    }
}

/// Create/get/update access to one-shot schedules.
#[async_trait]
pub trait TimerScheduler: Send + Sync {
    /// Registers a new schedule. Fails if a schedule with that name exists.
    async fn create(&self, schedule: Schedule) -> ScheduleResult<()>;

    /// Looks up a schedule by name. [`ScheduleError::NotFound`] once fired.
    async fn get(&self, name: &str) -> ScheduleResult<Schedule>;

    /// Replaces the fire time of an existing schedule in place.
    ///
    /// [`ScheduleError::NotFound`] if the schedule already fired; callers
    /// treat that as shutdown being in flight, not as a failure.
    async fn update_fire_at(&self, name: &str, fire_at: DateTime<Utc>) -> ScheduleResult<()>;
}
