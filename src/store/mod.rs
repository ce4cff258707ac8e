//! Durable service-record store boundary.
//!
//! One [`ServiceRecord`] per logical model, keyed by model id. The record is
//! the single point of truth for "is an endpoint live" and is only mutated
//! through the operations on [`StateStore`]. The conditional
//! [`StateStore::transition_status`] is the correctness-critical primitive:
//! it is what keeps concurrent start requests from each deploying an
//! endpoint.

pub mod error;
pub mod memory;


pub use error::{StateError, StateResult};
pub use memory::MemoryStateStore;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Endpoint lifecycle status.
///
/// `Stopped` and `InService` are the resting states; `Creating` and
/// `Stopping` are transient. Wire values match the persisted status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EndpointStatus {
    #[default]
    #[serde(rename = "STOPPED")]
    Stopped,
    #[serde(rename = "CREATING")]
    Creating,
    #[serde(rename = "IN_SERVICE")]
    InService,
    #[serde(rename = "STOPPING")]
    Stopping,
}

impl fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stopped => "STOPPED",
            Self::Creating => "CREATING",
            Self::InService => "IN_SERVICE",
            Self::Stopping => "STOPPING",
        };
        f.write_str(s)
    }
}

/// A requester waiting to be notified when the endpoint becomes ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub name: String,
    pub phone: String,
}

impl Subscriber {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// The persisted lifecycle record for one model.
///
/// `endpoint_name` is present iff the status is `Creating`, `InService` or
/// `Stopping`. `schedule_name` is present iff an idle timer is armed (only
/// while `InService`). `subscribers` accumulates while `Creating` and is
/// drained exactly once on the transition to `InService`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub model_id: String,
    pub status: EndpointStatus,
    pub endpoint_name: Option<String>,
    pub schedule_name: Option<String>,
    pub subscribers: Vec<Subscriber>,
}

impl ServiceRecord {
    /// A stopped record with no endpoint, timer or subscribers.
    ///
    /// An absent record reads as this: the record is created implicitly on
    /// first access and reused across provision/teardown cycles.
    pub fn stopped(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            status: EndpointStatus::Stopped,
            endpoint_name: None,
            schedule_name: None,
            subscribers: Vec::new(),
        }
    }
}

/// Keyed record store with point reads, a conditional status update and a
/// subscriber list-append.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Reads the record for `model_id` (a stopped record if absent).
    async fn get(&self, model_id: &str) -> StateResult<ServiceRecord>;

    /// Compare-and-swap on the status field.
    ///
    /// Atomically sets `status = next` only if the stored status still equals
    /// `expected`; fails with [`StateError::ConditionFailed`] otherwise. This
    /// is the primitive that serializes concurrent start requests.
    async fn transition_status(
        &self,
        model_id: &str,
        expected: EndpointStatus,
        next: EndpointStatus,
    ) -> StateResult<()>;

    /// Unconditionally sets the status field.
    async fn set_status(&self, model_id: &str, status: EndpointStatus) -> StateResult<()>;

    /// Appends one subscriber to the list.
    ///
    /// Atomic per call, but deliberately not conditioned on the status field;
    /// callers subscribe after observing (or losing a race into) `Creating`.
    async fn push_subscriber(&self, model_id: &str, subscriber: Subscriber) -> StateResult<()>;

    /// Reads and clears the subscriber list in one operation.
    ///
    /// The single drain point: each subscriber comes back from exactly one
    /// call across a creation cycle.
    async fn take_subscribers(&self, model_id: &str) -> StateResult<Vec<Subscriber>>;

    /// Records the deployed endpoint name and replaces the subscriber list.
    ///
    /// Used by the start-race winner; overwrites any stale list from a
    /// previous cycle.
    async fn set_endpoint(
        &self,
        model_id: &str,
        endpoint_name: &str,
        subscribers: Vec<Subscriber>,
    ) -> StateResult<()>;

    /// Sets or clears the armed idle-timer schedule name.
    async fn set_schedule(&self, model_id: &str, schedule_name: Option<&str>) -> StateResult<()>;

    /// Returns the record to `Stopped` with endpoint and schedule cleared.
    async fn reset(&self, model_id: &str) -> StateResult<()>;
}
