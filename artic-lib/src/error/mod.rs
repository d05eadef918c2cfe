//! Error types

mod api;
mod validation;

pub use api::*;
pub use validation::*;

/// Top-level error type for the artworks client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// User input was rejected before any state was touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Rate limited by the API after exhausting retries.
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimit {
        /// Server-suggested wait, if one was sent.
        retry_after: Option<std::time::Duration>,
    },
}

impl Error {
    /// Returns `true` if retrying the triggering action could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            Self::Validation(_) => false,
            Self::RateLimit { .. } => true,
        }
    }
}
