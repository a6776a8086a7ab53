//! Retry policy with exponential backoff
//!
//! The policy only describes *when* to try again; the async loop that applies
//! it lives next to the provider calls.
//!
//! # Example
//!
//! ```rust
//! use nutrisearch_core::retry::RetryConfig;
//! use std::time::Duration;
//!
//! let config = RetryConfig::with_attempts(3);
//! assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
//! assert!(config.allows_retry_after(1));
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add random jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a config with no retries
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Default backoff with a specific attempt budget (`1` disables retries)
    #[must_use]
    pub fn with_attempts(attempts: u32) -> Self {
        if attempts <= 1 {
            return Self::no_retry();
        }
        Self {
            max_attempts: attempts,
            ..Self::default()
        }
    }

    /// Whether another attempt is allowed after `attempt` (zero-based) failed
    #[must_use]
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }

    /// Calculate delay for a given attempt
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base_delay = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        let delay_secs = base_delay.min(self.max_delay.as_secs_f64());

        let final_delay = if self.jitter {
            // Add up to 25% jitter
            let jitter_factor = 1.0 + (rand_simple() * 0.25);
            delay_secs * jitter_factor
        } else {
            delay_secs
        };

        Duration::from_secs_f64(final_delay)
    }
}

/// Simple pseudo-random number generator (0.0 to 1.0)
fn rand_simple() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u32(nanos);
    #[allow(clippy::cast_precision_loss)]
    let fraction = (hasher.finish() % 1000) as f64 / 1000.0;
    fraction
}
