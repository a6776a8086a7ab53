//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{FoodsApi, SearchApi};
use crate::error::{ApiError, ApiResult, ErrorContext};
use nutrisearch_core::rate_limit::{RateLimitStatus, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Query parameter carrying the key
const API_KEY_PARAM: &str = "api_key";

/// FoodData Central client
///
/// This client wraps `reqwest` and adds:
/// - API key injection
/// - Client-side rate limiting per key
/// - Request correlation IDs for tracing
///
/// It never retries; callers decide what is worth repeating.
#[derive(Clone)]
pub struct FoodDataClient {
    inner: Client,
    config: Arc<ClientConfig>,
    rate_limiter: Arc<RateLimiter>,
}

impl FoodDataClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("nutrisearch/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            rate_limiter,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Remaining request budget for the configured key
    #[must_use]
    pub fn rate_limit_status(&self) -> RateLimitStatus {
        self.rate_limiter.status(&self.config.api_key)
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access the search endpoint
    #[must_use]
    pub fn search(&self) -> SearchApi {
        SearchApi::new(self.clone())
    }

    /// Access the food detail endpoint
    #[must_use]
    pub fn foods(&self) -> FoodsApi {
        FoodsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request
    #[instrument(skip(self), fields(request_id))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    /// Perform a GET request where 404 means "no such record"
    #[instrument(skip(self), fields(request_id))]
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Option<T>> {
        match self.request(Method::GET, path, Option::<&()>::None).await {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::Provider { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Perform a POST request with a JSON body
    #[instrument(skip(self, body), fields(request_id))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let context = ErrorContext {
            request_id: Uuid::new_v4().to_string(),
            endpoint: path.to_string(),
            method: method.to_string(),
        };
        tracing::Span::current().record("request_id", context.request_id.as_str());

        if !self.rate_limiter.try_acquire(&self.config.api_key) {
            let retry_in = self.rate_limiter.time_until_available(&self.config.api_key);
            warn!(context = %context, retry_in_ms = retry_in.as_millis(), "Rate limited");
            return Err(ApiError::RateLimited { retry_in });
        }

        let mut request = self
            .inner
            .request(method, self.url(path))
            .query(&[(API_KEY_PARAM, self.config.api_key.as_str())])
            .header(X_REQUEST_ID, &context.request_id);

        if let Some(b) = body {
            request = request.json(b);
        }

        let start = Instant::now();
        let result = match request.send().await {
            Ok(response) => self.handle_response(response).await,
            Err(e) if e.is_timeout() => Err(ApiError::Timeout(self.config.timeout)),
            Err(e) => Err(ApiError::Request(e)),
        };
        let elapsed_ms = start.elapsed().as_millis();

        match &result {
            Ok(_) => debug!(context = %context, elapsed_ms, "Request succeeded"),
            Err(e) => debug!(context = %context, elapsed_ms, error = %e, "Request failed"),
        }

        result
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(ApiError::provider(status.as_u16(), body_text(status, &bytes)))
        }
    }
}

fn body_text(status: StatusCode, bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes).trim().to_string();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FoodDataClient::with_config(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig::default().with_base_url("not a url");
        assert!(FoodDataClient::with_config(config).is_err());
    }

    #[test]
    fn test_url_joining() {
        let client =
            FoodDataClient::with_config(ClientConfig::default().with_base_url("http://localhost:1234/fdc/v1/")).unwrap();
        assert_eq!(client.url("foods/search"), "http://localhost:1234/fdc/v1/foods/search");
        assert_eq!(client.url("/food/42"), "http://localhost:1234/fdc/v1/food/42");
    }

    #[test]
    fn test_body_text_falls_back_to_reason() {
        assert_eq!(body_text(StatusCode::BAD_GATEWAY, b"  "), "Bad Gateway");
        assert_eq!(body_text(StatusCode::BAD_REQUEST, b"bad query"), "bad query");
    }

    #[test]
    fn test_rate_limit_status_uses_key_budget() {
        let client = FoodDataClient::with_config(ClientConfig::default()).unwrap();
        // 30/hour plus a burst of 10
        assert_eq!(client.rate_limit_status().max, 40);
    }
}
