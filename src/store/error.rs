use thiserror::Error;

use super::EndpointStatus;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("status precondition failed: expected {expected}, found {actual}")]
    ConditionFailed {
        expected: EndpointStatus,
        actual: EndpointStatus,
    },

    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StateResult<T> = Result<T, StateError>;
