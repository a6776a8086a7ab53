//! Search endpoint
//!
//! Maps to `POST /foods/search`, which returns one page of abridged food
//! records matching a keyword query.

use crate::client::FoodDataClient;
use crate::error::ApiResult;
use nutrisearch_core::config::PROVIDER_MAX_PAGE_SIZE;
use nutrisearch_search::{DataType, RawCandidate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Search API interface
#[derive(Clone)]
pub struct SearchApi {
    client: FoodDataClient,
}

impl SearchApi {
    pub(crate) fn new(client: FoodDataClient) -> Self {
        Self { client }
    }

    /// Fetch one page of results (1-based `page_number`).
    ///
    /// `page_size` is capped at the provider maximum. A single attempt is
    /// made; non-success statuses surface as provider errors.
    ///
    /// POST /foods/search
    pub async fn fetch_page(&self, query: &str, page_number: u32, page_size: u32) -> ApiResult<SearchPage> {
        let request = SearchRequest::new(query, page_number, page_size);
        let response: SearchResponse = self.client.post("foods/search", &request).await?;

        debug!(
            query,
            page = page_number,
            results = response.foods.len(),
            total_hits = response.total_hits,
            "Fetched search page"
        );

        Ok(SearchPage {
            candidates: response.foods,
            current_page: response.current_page.unwrap_or(page_number),
            total_hits: response.total_hits,
            total_pages: response.total_pages,
        })
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of a search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,
    /// Source categories to include
    pub data_type: Vec<DataType>,
    /// Results per page
    pub page_size: u32,
    /// 1-based page index
    pub page_number: u32,
    /// Sort field
    pub sort_by: String,
    /// `asc` or `desc`
    pub sort_order: String,
}

impl SearchRequest {
    /// Request over every searchable category, sorted by category.
    #[must_use]
    pub fn new(query: impl Into<String>, page_number: u32, page_size: u32) -> Self {
        Self {
            query: query.into(),
            data_type: DataType::SEARCHABLE.to_vec(),
            page_size: page_size.min(PROVIDER_MAX_PAGE_SIZE),
            page_number,
            sort_by: "dataType.keyword".to_string(),
            sort_order: "asc".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<RawCandidate>,
    #[serde(default)]
    total_hits: u64,
    #[serde(default)]
    current_page: Option<u32>,
    #[serde(default)]
    total_pages: u32,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    /// Records on this page, in provider order
    pub candidates: Vec<RawCandidate>,
    /// Page index echoed by the provider
    pub current_page: u32,
    /// Total matches for the query (authoritative on page 1)
    pub total_hits: u64,
    /// Total pages at the requested page size
    pub total_pages: u32,
}
