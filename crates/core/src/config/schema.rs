//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default FoodData Central API root
pub const DEFAULT_FDC_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Largest page size the provider accepts for a search request
pub const PROVIDER_MAX_PAGE_SIZE: u32 = 25;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Provider connection settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Comprehensive search and ranking settings
    #[serde(default)]
    pub search: SearchConfig,
}

impl ConfigSchema {
    /// Validate value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        self.search.validate()
    }
}

/// FoodData Central connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; environment variables take precedence over this value
    #[serde(default)]
    pub api_key: Option<String>,

    /// API root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::config_invalid(format!(
                "provider.base_url must start with http:// or https:// (got {:?})",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config_invalid("provider.timeout_secs cannot be zero"));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_FDC_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Comprehensive search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results requested per provider page (capped at 25)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Concurrent page requests per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Hard ceiling on pages fetched by one search
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Candidates gathered before ranking
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,

    /// Upper bound on a single page fetch, in seconds
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Attempts per page, including the first one
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Optional TOML file overriding the built-in scoring tables
    #[serde(default)]
    pub scoring_tables: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            batch_size: default_batch_size(),
            max_pages: default_max_pages(),
            candidate_pool: default_candidate_pool(),
            page_timeout_secs: default_page_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            scoring_tables: None,
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > PROVIDER_MAX_PAGE_SIZE {
            return Err(Error::config_invalid(format!(
                "search.page_size must be between 1 and {PROVIDER_MAX_PAGE_SIZE}"
            )));
        }
        if self.batch_size == 0 {
            return Err(Error::config_invalid("search.batch_size cannot be zero"));
        }
        if self.max_pages == 0 {
            return Err(Error::config_invalid("search.max_pages cannot be zero"));
        }
        if self.retry_attempts == 0 {
            return Err(Error::config_invalid("search.retry_attempts cannot be zero"));
        }
        Ok(())
    }
}

fn default_page_size() -> u32 {
    PROVIDER_MAX_PAGE_SIZE
}

fn default_batch_size() -> usize {
    5
}

fn default_max_pages() -> u32 {
    20
}

fn default_candidate_pool() -> usize {
    200
}

fn default_page_timeout_secs() -> u64 {
    20
}

fn default_retry_attempts() -> u32 {
    1
}
