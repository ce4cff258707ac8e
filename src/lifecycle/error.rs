use thiserror::Error;

use crate::provision::ProvisionError;
use crate::schedule::ScheduleError;
use crate::store::StateError;

/// Lifecycle failures that escape a component boundary.
///
/// Lost CAS races and benign not-founds never appear here; those are
/// resolved inside the operations as ordinary control flow.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("model endpoint is not available")]
    NotAvailable,

    #[error(transparent)]
    State(#[from] StateError),

    #[error("provisioning failed: {0}")]
    Provision(#[from] ProvisionError),

    #[error("scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
