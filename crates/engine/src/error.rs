//! Error type for engine setup and searches

use nutrisearch_api_client::ApiError;
use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration file or scoring tables could not be loaded
    #[error(transparent)]
    Config(#[from] nutrisearch_core::Error),

    /// Provider call or client setup failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl EngineError {
    /// Provider HTTP status, if the provider answered with an error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status(),
            Self::Config(_) => None,
        }
    }
}
