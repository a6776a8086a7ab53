//! Multi-page candidate gathering.
//!
//! Page 1 is fetched alone: it is the only authoritative source of the hit
//! count, and a failure there fails the whole search. The remaining pages are
//! fetched in fixed-size concurrent batches; each batch is drained before the
//! next starts, so at most `batch_size` requests are in flight. A failed page
//! beyond the first only costs its own results.

use nutrisearch_api_client::{ApiError, ApiResult, FoodDataSource, SearchPage};
use nutrisearch_core::config::{SearchConfig, PROVIDER_MAX_PAGE_SIZE};
use nutrisearch_core::retry::RetryConfig;
use nutrisearch_search::RawCandidate;
use nutrisearch_telemetry::{metrics, names, Timer};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Tuning for one comprehensive search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Results per provider page (at most 25)
    pub page_size: u32,
    /// Concurrent requests per batch
    pub batch_size: usize,
    /// Hard ceiling on pages per search
    pub max_pages: u32,
    /// Upper bound on one page fetch, retries excluded
    pub page_timeout: Duration,
    /// Retry policy applied to every page
    pub retry: RetryConfig,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: PROVIDER_MAX_PAGE_SIZE,
            batch_size: 5,
            max_pages: 20,
            page_timeout: Duration::from_secs(20),
            retry: RetryConfig::no_retry(),
        }
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            page_size: config.page_size.clamp(1, PROVIDER_MAX_PAGE_SIZE),
            batch_size: config.batch_size.max(1),
            max_pages: config.max_pages.max(1),
            page_timeout: Duration::from_secs(config.page_timeout_secs),
            retry: RetryConfig::with_attempts(config.retry_attempts),
        }
    }
}

impl SearchSettings {
    /// Builder-style method to set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Builder-style method to set the per-page timeout
    #[must_use]
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    /// Pages worth requesting for `max_results` when the query has `total_hits`.
    #[must_use]
    pub fn pages_needed(&self, max_results: usize, total_hits: u64) -> u32 {
        let page_size = u64::from(self.page_size.max(1));
        let wanted = u64::try_from(max_results).unwrap_or(u64::MAX).div_ceil(page_size);
        let available = total_hits.div_ceil(page_size);
        let pages = wanted.min(available).min(u64::from(self.max_pages));
        u32::try_from(pages).unwrap_or(self.max_pages)
    }
}

/// A page that contributed nothing because its fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFailure {
    /// 1-based page number
    pub page: u32,
    /// Provider status, if the provider answered
    pub status: Option<u16>,
    /// Error description
    pub error: String,
}

impl PageFailure {
    fn new(page: u32, error: &ApiError) -> Self {
        Self {
            page,
            status: error.status(),
            error: error.to_string(),
        }
    }
}

/// Merged candidates of one search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Candidates in page order, unique by `fdc_id`, at most `max_results`
    pub candidates: Vec<RawCandidate>,
    /// Hit count reported by page 1
    pub total_hits: u64,
    /// Pages fetched successfully, page 1 included
    pub pages_fetched: u32,
    /// Pages beyond the first that failed
    pub failures: Vec<PageFailure>,
}

/// Gathers a candidate pool across result pages.
pub struct ComprehensiveSearch<S: FoodDataSource> {
    source: Arc<S>,
    settings: SearchSettings,
}

impl<S: FoodDataSource> Clone for ComprehensiveSearch<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            settings: self.settings.clone(),
        }
    }
}

impl<S: FoodDataSource> ComprehensiveSearch<S> {
    /// Search over `source`
    pub fn new(source: Arc<S>, settings: SearchSettings) -> Self {
        Self { source, settings }
    }

    /// Settings in use
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Up to `max_results` unique candidates for `query`.
    ///
    /// Fails only if page 1 fails. A blank query or a zero budget returns an
    /// empty outcome without contacting the provider.
    pub async fn search(&self, query: &str, max_results: usize) -> ApiResult<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() || max_results == 0 {
            return Ok(SearchOutcome::default());
        }

        metrics().increment(names::SEARCH_REQUESTS);
        let timer = Timer::start(names::SEARCH_DURATION_MS);

        let first = match fetch_with_policy(self.source.as_ref(), query, 1, &self.settings).await {
            Ok(page) => page,
            Err(e) => {
                metrics().increment(names::PAGES_FAILED);
                warn!(query, error = %e, "First result page failed");
                return Err(e);
            }
        };
        metrics().increment(names::PAGES_FETCHED);

        let mut merger = Merger::new(max_results);
        let total_hits = first.total_hits;
        merger.extend(first.candidates);

        let mut outcome = SearchOutcome {
            total_hits,
            pages_fetched: 1,
            ..SearchOutcome::default()
        };

        let pages_needed = self.settings.pages_needed(max_results, total_hits);
        debug!(query, total_hits, pages_needed, "Planned result pages");

        let mut next = 2;
        while next <= pages_needed && !merger.is_full() {
            let batch_len = u32::try_from(self.settings.batch_size.max(1)).unwrap_or(u32::MAX);
            let last = pages_needed.min(next.saturating_add(batch_len - 1));

            for (page, result) in self.fetch_batch(query, next..=last).await {
                match result {
                    Ok(page_results) => {
                        metrics().increment(names::PAGES_FETCHED);
                        outcome.pages_fetched += 1;
                        merger.extend(page_results.candidates);
                    }
                    Err(e) => {
                        metrics().increment(names::PAGES_FAILED);
                        warn!(query, page, error = %e, "Result page failed, continuing without it");
                        outcome.failures.push(PageFailure::new(page, &e));
                    }
                }
            }

            next = last + 1;
        }

        outcome.candidates = merger.into_candidates();
        let elapsed = timer.stop();

        info!(
            query,
            total_hits,
            candidates = outcome.candidates.len(),
            pages = outcome.pages_fetched,
            failed_pages = outcome.failures.len(),
            elapsed_ms = elapsed.as_millis(),
            "Comprehensive search finished"
        );

        Ok(outcome)
    }

    /// Fetch `pages` concurrently; results come back in page order.
    async fn fetch_batch(
        &self,
        query: &str,
        pages: std::ops::RangeInclusive<u32>,
    ) -> Vec<(u32, ApiResult<SearchPage>)> {
        let mut tasks = JoinSet::new();
        let mut task_pages = HashMap::new();

        for page in pages {
            let source = Arc::clone(&self.source);
            let settings = self.settings.clone();
            let query = query.to_string();
            let handle = tasks.spawn(async move { fetch_with_policy(source.as_ref(), &query, page, &settings).await });
            task_pages.insert(handle.id(), page);
        }

        let mut results = Vec::with_capacity(task_pages.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, result)) => {
                    if let Some(&page) = task_pages.get(&id) {
                        results.push((page, result));
                    }
                }
                Err(join_error) => {
                    if let Some(&page) = task_pages.get(&join_error.id()) {
                        let error = ApiError::config(format!("page task aborted: {join_error}"));
                        results.push((page, Err(error)));
                    }
                }
            }
        }

        results.sort_by_key(|(page, _)| *page);
        results
    }
}

/// One page fetch under the per-page timeout and retry policy.
async fn fetch_with_policy<S: FoodDataSource>(
    source: &S,
    query: &str,
    page: u32,
    settings: &SearchSettings,
) -> ApiResult<SearchPage> {
    let mut attempt = 0;
    loop {
        let delay = settings.retry.delay_for_attempt(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = tokio::time::timeout(settings.page_timeout, source.fetch_page(query, page, settings.page_size))
            .await
            .unwrap_or(Err(ApiError::Timeout(settings.page_timeout)));

        match result {
            Ok(page_results) => return Ok(page_results),
            Err(e) if e.is_retryable() && settings.retry.allows_retry_after(attempt) => {
                debug!(query, page, attempt = attempt + 1, error = %e, "Page fetch failed, will retry");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Accumulates candidates in arrival order, first occurrence of an id wins.
struct Merger {
    seen: HashSet<u64>,
    candidates: Vec<RawCandidate>,
    limit: usize,
}

impl Merger {
    fn new(limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            candidates: Vec::new(),
            limit,
        }
    }

    fn is_full(&self) -> bool {
        self.candidates.len() >= self.limit
    }

    fn extend(&mut self, candidates: Vec<RawCandidate>) {
        for candidate in candidates {
            if self.is_full() {
                break;
            }
            if self.seen.insert(candidate.fdc_id) {
                self.candidates.push(candidate);
            }
        }
    }

    fn into_candidates(self) -> Vec<RawCandidate> {
        self.candidates
    }
}
