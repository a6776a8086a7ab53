//! USDA FoodData Central client for NutriSearch
//!
//! This crate provides a typed HTTP client for the two provider endpoints the
//! search engine needs: paginated keyword search and single-food detail.
//!
//! # Features
//!
//! - **Environment-based configuration**: API key, URL and timeout from environment variables
//! - **Demonstration key fallback**: Works out of the box with `DEMO_KEY` (tightly throttled)
//! - **Rate limiting**: Client-side token bucket per API key
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use nutrisearch_api_client::{FoodDataClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FoodDataClient::new()?;
//!
//!     let page = client.search().fetch_page("banana", 1, 25).await?;
//!     println!("{} hits, {} on this page", page.total_hits, page.candidates.len());
//!
//!     if let Some(food) = client.foods().get(173944).await? {
//!         println!("{}", food.description);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod source;

pub use client::FoodDataClient;
pub use config::{ApiKeySource, ClientConfig, DEMO_API_KEY};
pub use endpoints::SearchPage;
pub use error::{ApiError, ApiResult};
pub use source::FoodDataSource;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::FoodDataClient;
    pub use crate::config::{ApiKeySource, ClientConfig};
    pub use crate::endpoints::{FoodsApi, SearchApi, SearchPage};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::source::FoodDataSource;
}
