//! Error types for the API client

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure: connection, TLS, body read. No HTTP status.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The provider answered with a non-success status
    #[error("Provider error ({status}): {body}")]
    Provider {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Client-side rate limit for the API key is exhausted
    #[error("Rate limited - retry in {retry_in:?}")]
    RateLimited {
        /// Time until the next request would be admitted
        retry_in: Duration,
    },

    /// Request timeout
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create a provider error
    pub fn provider(status: u16, body: impl Into<String>) -> Self {
        Self::Provider {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::Provider { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout(_) => true,
            Self::RateLimited { .. }
            | Self::Config(_)
            | Self::MissingEnvVar(_)
            | Self::Json(_)
            | Self::InvalidUrl(_) => false,
        }
    }

    /// HTTP status, for provider errors
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Provider { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Provider { status, .. } if *status >= 500)
    }
}

/// Error context for better debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Request ID for correlation
    pub request_id: String,
    /// Endpoint that was called
    pub endpoint: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (request_id: {})", self.method, self.endpoint, self.request_id)
    }
}
