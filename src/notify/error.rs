use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification rejected by provider: {0}")]
    Rejected(String),
}

pub type NotifyResult<T> = Result<T, NotifyError>;
