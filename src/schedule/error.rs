use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("schedule {name} not found (it may have already fired)")]
    NotFound { name: String },

    #[error("schedule {name} already exists")]
    AlreadyExists { name: String },

    #[error("scheduler backend error: {0}")]
    Backend(String),
}

impl ScheduleError {
    /// The benign case: the schedule is gone because it already fired.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
