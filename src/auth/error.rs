use crate::{api::ApiError, auth::storage::StorageError};
use thiserror::Error;

/// Generic message when the backend rejects an assertion without a detail.
pub const EXCHANGE_FALLBACK_MESSAGE: &str = "Authentication failed";

/// Failures of the login, bootstrap and logout flows. `Display` output is safe
/// to show to the user and never contains token material.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no user identifier received")]
    AssertionMissingField,
    #[error("{0}")]
    Exchange(String),
    #[error("failed to get user info (HTTP {status})")]
    Profile { status: u16 },
    #[error("Unable to reach the server. Please try again.")]
    Network(String),
    #[error("unexpected response from server: {0}")]
    InvalidResponse(String),
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
    #[error("an authentication attempt is already in progress")]
    Busy,
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) | ApiError::Timeout(message) => AuthError::Network(message),
            ApiError::Http { status, .. } => AuthError::Profile { status },
            ApiError::Parse(message) | ApiError::Config(message) => {
                AuthError::InvalidResponse(message)
            }
        }
    }
}
