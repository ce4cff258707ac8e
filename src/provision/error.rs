use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("endpoint {name} not found (it may have already been deleted)")]
    EndpointNotFound { name: String },

    #[error("provisioner request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provisioner returned {status}: {message}")]
    Upstream { status: u16, message: String },
}

impl ProvisionError {
    /// The benign teardown case: the endpoint is already gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EndpointNotFound { .. })
    }
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;
