pub mod clients;
pub mod users;

use thiserror::Error;

use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No billing API key configured; a blocking validation alert, not a
    /// network error.
    #[error("Billing API key is not configured")]
    MissingCredential,

    /// Client-side validation failed; the mutation was never invoked.
    #[error("{0}")]
    Form(String),

    #[error("Entity not found")]
    NotFound,

    #[error("{0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::MissingApiKey => ServiceError::MissingCredential,
            other => ServiceError::Repository(other),
        }
    }
}
