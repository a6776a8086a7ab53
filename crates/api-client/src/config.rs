//! Configuration for the FoodData Central client
//!
//! Environment variables win over the optional configuration file, which wins
//! over built-in defaults.

use crate::error::{ApiError, ApiResult};
use nutrisearch_core::config::{ProviderConfig, DEFAULT_FDC_BASE_URL};
use nutrisearch_core::rate_limit::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::warn;

/// Publicly documented demonstration key, heavily throttled by the provider
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Primary API key variable
pub const API_KEY_VAR: &str = "FDC_API_KEY";

/// Alternate API key variable
pub const ALT_API_KEY_VAR: &str = "USDA_API_KEY";

/// API root override
pub const API_URL_VAR: &str = "FDC_API_URL";

/// Transport timeout override, in seconds
pub const TIMEOUT_VAR: &str = "FDC_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the API key came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeySource {
    /// Read from the named environment variable
    Environment(String),
    /// Read from the configuration file
    ConfigFile,
    /// Set in code
    #[default]
    Explicit,
    /// No key configured; the demonstration key is in use
    DemoFallback,
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.nal.usda.gov/fdc/v1`
    pub base_url: String,
    /// Key sent as the `api_key` query parameter
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Where `api_key` came from
    pub api_key_source: ApiKeySource,
    /// Transport timeout per request
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Client-side request budget for the key
    pub rate_limit: RateLimitConfig,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FDC_BASE_URL.to_string(),
            api_key: DEMO_API_KEY.to_string(),
            api_key_source: ApiKeySource::DemoFallback,
            timeout: DEFAULT_TIMEOUT,
            rate_limit: rate_limit_for(DEMO_API_KEY),
        }
    }
}

/// Request budget for a key: the demonstration key is limited to 30 requests
/// per hour by the provider, registered keys to 1000.
#[must_use]
pub fn rate_limit_for(api_key: &str) -> RateLimitConfig {
    if api_key == DEMO_API_KEY {
        RateLimitConfig::per_hour(30)
    } else {
        RateLimitConfig::per_hour(1000)
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `FDC_API_KEY`, then `USDA_API_KEY`: API key (falls back to `DEMO_KEY`)
    /// - `FDC_API_URL`: API root
    /// - `FDC_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::resolve(env_lookup, None, false)
    }

    /// Like [`from_env`](Self::from_env), but a missing API key is an error
    /// instead of falling back to the demonstration key.
    pub fn from_env_strict() -> ApiResult<Self> {
        Self::resolve(env_lookup, None, true)
    }

    /// Environment variables layered over the `[provider]` file section.
    pub fn from_env_and_file(provider: &ProviderConfig) -> ApiResult<Self> {
        Self::resolve(env_lookup, Some(provider), false)
    }

    /// Build from an arbitrary variable lookup (tests, embedding).
    pub fn from_lookup<F>(lookup: F, strict: bool) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(lookup, None, strict)
    }

    fn resolve<F>(lookup: F, provider: Option<&ProviderConfig>, strict: bool) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let (api_key, api_key_source) = if let Some(key) = var(API_KEY_VAR) {
            (key, ApiKeySource::Environment(API_KEY_VAR.to_string()))
        } else if let Some(key) = var(ALT_API_KEY_VAR) {
            (key, ApiKeySource::Environment(ALT_API_KEY_VAR.to_string()))
        } else if let Some(key) = provider.and_then(|p| p.api_key.clone()).filter(|k| !k.trim().is_empty()) {
            (key, ApiKeySource::ConfigFile)
        } else if strict {
            return Err(ApiError::missing_env(API_KEY_VAR));
        } else {
            warn!(
                "Neither {API_KEY_VAR} nor {ALT_API_KEY_VAR} is set; using {DEMO_API_KEY} (30 requests/hour)"
            );
            (DEMO_API_KEY.to_string(), ApiKeySource::DemoFallback)
        };

        let base_url = var(API_URL_VAR)
            .or_else(|| provider.map(|p| p.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_FDC_BASE_URL.to_string());

        let timeout = match var(TIMEOUT_VAR) {
            Some(raw) => raw
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}")))?,
            None => provider.map_or(DEFAULT_TIMEOUT, |p| Duration::from_secs(p.timeout_secs)),
        };

        let rate_limit = rate_limit_for(&api_key);

        Ok(Self {
            base_url,
            api_key,
            api_key_source,
            timeout,
            rate_limit,
        })
    }

    /// Whether the demonstration key is in use
    #[must_use]
    pub fn is_demo_key(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }

    /// Builder-style method to set the API key (and its matching rate limit)
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self.api_key_source = ApiKeySource::Explicit;
        self.rate_limit = rate_limit_for(&self.api_key);
        self
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set rate limit config
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(self.base_url.clone()));
        }

        if self.api_key.trim().is_empty() {
            return Err(ApiError::config("api_key cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_FDC_BASE_URL);
        assert!(config.is_demo_key());
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_demo_key_fallback() {
        let config = ClientConfig::from_lookup(lookup(&[]), false).unwrap();
        assert_eq!(config.api_key, DEMO_API_KEY);
        assert_eq!(config.api_key_source, ApiKeySource::DemoFallback);
        assert_eq!(config.rate_limit, RateLimitConfig::per_hour(30));
    }

    #[test]
    fn test_strict_refuses_fallback() {
        let err = ClientConfig::from_lookup(lookup(&[]), true).unwrap_err();
        assert!(matches!(err, ApiError::MissingEnvVar(ref var) if var == API_KEY_VAR));
    }

    #[test]
    fn test_primary_key_wins() {
        let config = ClientConfig::from_lookup(
            lookup(&[(API_KEY_VAR, "primary"), (ALT_API_KEY_VAR, "alternate")]),
            true,
        )
        .unwrap();
        assert_eq!(config.api_key, "primary");
        assert_eq!(config.api_key_source, ApiKeySource::Environment(API_KEY_VAR.to_string()));
        assert_eq!(config.rate_limit, RateLimitConfig::per_hour(1000));
    }

    #[test]
    fn test_alternate_key_and_blank_primary() {
        let config =
            ClientConfig::from_lookup(lookup(&[(API_KEY_VAR, "  "), (ALT_API_KEY_VAR, "alternate")]), true).unwrap();
        assert_eq!(config.api_key, "alternate");
    }

    #[test]
    fn test_url_and_timeout_overrides() {
        let config = ClientConfig::from_lookup(
            lookup(&[(API_URL_VAR, "http://localhost:9000/fdc"), (TIMEOUT_VAR, "3")]),
            false,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/fdc");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")]), false).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_file_values_fill_gaps() {
        let provider = ProviderConfig {
            api_key: Some("from-file".to_string()),
            base_url: "https://mirror.example.org/fdc/v1".to_string(),
            timeout_secs: 40,
        };
        let config = ClientConfig::resolve(lookup(&[(TIMEOUT_VAR, "5")]), Some(&provider), true).unwrap();

        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.api_key_source, ApiKeySource::ConfigFile);
        assert_eq!(config.base_url, "https://mirror.example.org/fdc/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_api_key("registered")
            .with_base_url("https://test.example.org/fdc/v1")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://test.example.org/fdc/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(!config.is_demo_key());
        assert_eq!(config.rate_limit, RateLimitConfig::per_hour(1000));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            ClientConfig::default().with_base_url("ftp://x").validate(),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_api_key("").validate().is_err());
        assert!(ClientConfig::default().with_timeout(Duration::ZERO).validate().is_err());
    }
}
