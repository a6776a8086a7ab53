//! Client-side rate limiting for provider API keys
//!
//! FoodData Central meters every key (the public demonstration key far more
//! tightly than a registered one). A token bucket per key keeps a single
//! process from burning through that budget in one comprehensive search.
//!
//! # Example
//!
//! ```rust
//! use nutrisearch_core::rate_limit::{RateLimitConfig, RateLimiter};
//!
//! let limiter = RateLimiter::new(RateLimitConfig::per_hour(1000));
//! assert!(limiter.try_acquire("my-api-key"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Rate limiter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_hour(1000)
    }
}

impl RateLimitConfig {
    /// Create a strict rate limit (no burst)
    #[must_use]
    pub fn strict(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            burst: 0,
        }
    }

    /// Per-hour rate limit, the unit the provider publishes its quotas in
    #[must_use]
    pub fn per_hour(max: u32) -> Self {
        Self {
            max_requests: max,
            window: Duration::from_secs(3600),
            burst: max / 3,
        }
    }

    fn capacity(&self) -> u32 {
        self.max_requests + self.burst
    }

    fn refill_rate(&self) -> f64 {
        f64::from(self.max_requests) / self.window.as_secs_f64()
    }
}

/// Token bucket state
#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
    config: RateLimitConfig,
}

impl TokenBucket {
    fn new(config: RateLimitConfig) -> Self {
        Self {
            tokens: f64::from(config.capacity()),
            last_update: Instant::now(),
            config,
        }
    }

    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        let new_tokens = elapsed.as_secs_f64() * self.config.refill_rate();

        self.tokens = (self.tokens + new_tokens).min(f64::from(self.config.capacity()));
        self.last_update = now;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn available(&mut self) -> u32 {
        self.refill();
        self.tokens as u32
    }

    fn time_until_available(&mut self) -> Duration {
        self.refill();

        if self.tokens >= 1.0 {
            return Duration::ZERO;
        }

        Duration::from_secs_f64((1.0 - self.tokens) / self.config.refill_rate())
    }
}

/// Rate limiter holding one bucket per key
pub struct RateLimiter {
    buckets: Arc<RwLock<HashMap<String, TokenBucket>>>,
    default_config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Arc::new(RwLock::new(HashMap::new())),
            default_config: config,
        }
    }

    /// Try to acquire a token for the given key
    #[must_use]
    pub fn try_acquire(&self, key: &str) -> bool {
        self.with_bucket(key, TokenBucket::try_acquire)
    }

    /// Get time until the next token is available
    #[must_use]
    pub fn time_until_available(&self, key: &str) -> Duration {
        self.with_bucket(key, TokenBucket::time_until_available)
    }

    /// Get rate limit status
    #[must_use]
    pub fn status(&self, key: &str) -> RateLimitStatus {
        let max = self.default_config.capacity();
        self.with_bucket(key, |bucket| RateLimitStatus {
            available: bucket.available(),
            max,
            next_token_in: bucket.time_until_available(),
        })
    }

    fn with_bucket<T>(&self, key: &str, f: impl FnOnce(&mut TokenBucket) -> T) -> T {
        // A poisoned lock still holds consistent bucket data
        let mut buckets = self.buckets.write().unwrap_or_else(|e| e.into_inner());
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(self.default_config.clone()));
        f(bucket)
    }
}

/// Rate limit status
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitStatus {
    /// Available tokens
    pub available: u32,
    /// Maximum tokens
    pub max: u32,
    /// Time until one more token is available
    pub next_token_in: Duration,
}
