//! Abstraction over where food records come from.
//!
//! The search engine drives any [`FoodDataSource`]; [`FoodDataClient`] is the
//! network implementation, tests substitute in-memory ones.

use crate::client::FoodDataClient;
use crate::endpoints::SearchPage;
use crate::error::ApiResult;
use nutrisearch_search::RawCandidate;
use std::future::Future;

/// A paginated source of provider records.
pub trait FoodDataSource: Send + Sync + 'static {
    /// One page of search results (1-based `page_number`).
    fn fetch_page(
        &self,
        query: &str,
        page_number: u32,
        page_size: u32,
    ) -> impl Future<Output = ApiResult<SearchPage>> + Send;

    /// Full record for one food, `None` if unknown.
    fn fetch_food(&self, fdc_id: u64) -> impl Future<Output = ApiResult<Option<RawCandidate>>> + Send;
}

impl FoodDataSource for FoodDataClient {
    async fn fetch_page(&self, query: &str, page_number: u32, page_size: u32) -> ApiResult<SearchPage> {
        self.search().fetch_page(query, page_number, page_size).await
    }

    async fn fetch_food(&self, fdc_id: u64) -> ApiResult<Option<RawCandidate>> {
        self.foods().get(fdc_id).await
    }
}
