//! Core utilities for the NutriSearch food search engine
//!
//! This crate provides shared functionality used by the provider client, the
//! search engine and the command-line front end:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with serde defaults
//! - **Retry policy**: Exponential backoff settings for provider calls
//! - **Rate limiting**: Token-bucket limiter guarding the provider API key
//!
//! # Example
//!
//! ```rust,no_run
//! use nutrisearch_core::config::Config;
//!
//! let config = Config::load(None).expect("config should load");
//! println!("page size: {}", config.schema.search.page_size);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::rate_limit::{RateLimitConfig, RateLimiter};
    pub use crate::retry::RetryConfig;
}
