use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No API key is configured; raised before any network I/O.
    #[error("Billing API key is not configured")]
    MissingApiKey,

    /// No response received from the billing API at all.
    #[error("No server response. Check the billing API connection and try again.")]
    NoServerResponse,

    /// The backend reported a failure; the message is shown verbatim.
    #[error("{0}")]
    Backend(String),

    #[error("Failed to decode billing API response: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            RepositoryError::NoServerResponse
        } else if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
