//! Standby library crate (used by the server binary and integration tests).
//!
//! Lifecycle coordination for an expensive, on-demand inference endpoint:
//! concurrent start requests are serialized down to a single deployment,
//! waiting requesters are notified when the endpoint becomes ready, and an
//! idle timer tears the endpoint down again, self-extending while usage
//! continues.
//!
//! The exports are organized by module:
//!
//! - [`Config`], [`ConfigError`] - server configuration
//! - [`store`] - the persisted [`ServiceRecord`] and the [`StateStore`]
//!   boundary with its conditional status transition
//! - [`schedule`] - one-shot idle timers behind [`TimerScheduler`]
//! - [`provision`] - endpoint create/delete and inference forwarding
//! - [`notify`] - readiness notification fan-out
//! - [`lifecycle`] - the [`LifecycleCoordinator`] tying it all together
//! - [`gateway`] - the Axum HTTP surface
//!
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod gateway;
pub mod lifecycle;
pub mod notify;
pub mod provision;
pub mod schedule;
pub mod store;

pub use config::{Config, ConfigError};
pub use lifecycle::{
    DEFAULT_EXTEND_THRESHOLD_SECS, DEFAULT_IDLE_WINDOW_SECS, ExtendOutcome, KeepAliveCheck,
    LifecycleConfig, LifecycleCoordinator, LifecycleError, LifecycleResult, StartOutcome,
};
pub use notify::{LogNotifier, Notifier, NotifyError, TextbeltNotifier};
pub use provision::{
    HttpInferenceClient, HttpProvisioner, InferenceClient, Provisioner, ProvisionError,
};
pub use schedule::{LocalScheduler, Schedule, SchedulePayload, ScheduleError, TimerScheduler};
pub use store::{
    EndpointStatus, MemoryStateStore, ServiceRecord, StateError, StateStore, Subscriber,
};

#[cfg(any(test, feature = "mock"))]
pub use notify::MockNotifier;
#[cfg(any(test, feature = "mock"))]
pub use provision::{MockInferenceClient, MockProvisioner};
#[cfg(any(test, feature = "mock"))]
pub use schedule::MockScheduler;
