//! Endpoint lifecycle coordination: single-flight start, readiness fan-out,
//! keep-alive timer deferral and idle shutdown.
//!
//! All coordination runs through the [`StateStore`](crate::store::StateStore)
//! and [`TimerScheduler`](crate::schedule::TimerScheduler); the coordinator
//! itself holds no status across calls. The `Stopped -> Creating` conditional
//! transition is what guarantees at most one endpoint is deployed per
//! idle-to-active surge, no matter how many start requests race.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod keepalive;
pub mod ready;
pub mod shutdown;
pub mod types;


pub use config::{DEFAULT_EXTEND_THRESHOLD_SECS, DEFAULT_IDLE_WINDOW_SECS, LifecycleConfig};
pub use coordinator::LifecycleCoordinator;
pub use error::{LifecycleError, LifecycleResult};
pub use types::{ExtendOutcome, KeepAliveCheck, StartOutcome};
