//! Public entry points: search-and-rank, food details, portion scaling.

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::orchestrator::{ComprehensiveSearch, PageFailure, SearchSettings};
use nutrisearch_api_client::{ApiResult, FoodDataClient, FoodDataSource};
use nutrisearch_search::{
    scale_portion, NormalizedFoodItem, NutrientNormalizer, PortionResult, RelevanceScorer, ResultRanker, ScoredFoodItem,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranked results plus what happened while gathering them.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSearch {
    /// Best matches first, with scores
    pub items: Vec<ScoredFoodItem>,
    /// Hit count reported by the provider
    pub total_hits: u64,
    /// Candidates considered before filtering and truncation
    pub candidates_considered: usize,
    /// Pages beyond the first that contributed nothing
    pub failures: Vec<PageFailure>,
}

impl RankedSearch {
    /// The ranked records without diagnostics
    #[must_use]
    pub fn into_items(self) -> Vec<NormalizedFoodItem> {
        self.items.into_iter().map(|scored| scored.item).collect()
    }
}

/// Food search over a [`FoodDataSource`].
pub struct FoodSearchEngine<S: FoodDataSource = FoodDataClient> {
    source: Arc<S>,
    search: ComprehensiveSearch<S>,
    ranker: ResultRanker,
    candidate_pool: usize,
}

impl FoodSearchEngine<FoodDataClient> {
    /// Engine over the FoodData Central client described by `config`
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let client = FoodDataClient::with_config(config.client)?;
        let ranker = ResultRanker::new(NutrientNormalizer::default(), RelevanceScorer::new(config.scoring_tables));
        Ok(Self::with_source(client, config.search, ranker, config.candidate_pool))
    }

    /// Engine configured from the environment with default tuning
    pub fn from_env() -> EngineResult<Self> {
        Self::from_config(EngineConfig::from_env()?)
    }
}

impl<S: FoodDataSource> FoodSearchEngine<S> {
    /// Engine over any source
    pub fn with_source(source: S, settings: SearchSettings, ranker: ResultRanker, candidate_pool: usize) -> Self {
        let source = Arc::new(source);
        Self {
            search: ComprehensiveSearch::new(Arc::clone(&source), settings),
            source,
            ranker,
            candidate_pool,
        }
    }

    /// The record source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The ranker in use
    pub fn ranker(&self) -> &ResultRanker {
        &self.ranker
    }

    /// Best `limit` records for `query`.
    ///
    /// Empty results are not an error. Fails only if the first result page
    /// cannot be fetched.
    pub async fn search_and_rank(&self, query: &str, limit: usize) -> ApiResult<Vec<NormalizedFoodItem>> {
        Ok(self.search_and_rank_detailed(query, limit).await?.into_items())
    }

    /// Like [`search_and_rank`](Self::search_and_rank), keeping scores and page failures.
    #[instrument(skip(self))]
    pub async fn search_and_rank_detailed(&self, query: &str, limit: usize) -> ApiResult<RankedSearch> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Ok(RankedSearch {
                items: Vec::new(),
                total_hits: 0,
                candidates_considered: 0,
                failures: Vec::new(),
            });
        }

        let pool = self.candidate_pool.max(limit);
        let outcome = self.search.search(query, pool).await?;
        let items = self.ranker.rank_scored(&outcome.candidates, query, limit);

        debug!(
            candidates = outcome.candidates.len(),
            ranked = items.len(),
            "Ranked candidates"
        );

        Ok(RankedSearch {
            items,
            total_hits: outcome.total_hits,
            candidates_considered: outcome.candidates.len(),
            failures: outcome.failures,
        })
    }

    /// Nutrients of `item` for `grams`
    #[must_use]
    pub fn scale_portion(&self, item: &NormalizedFoodItem, grams: f64) -> PortionResult {
        scale_portion(item, grams)
    }

    /// One food by provider id, normalized; `None` if unknown.
    #[instrument(skip(self))]
    pub async fn food_details(&self, fdc_id: u64) -> ApiResult<Option<NormalizedFoodItem>> {
        let candidate = self.source.fetch_food(fdc_id).await?;
        Ok(candidate.map(|c| self.ranker.normalizer().normalize_candidate(&c)))
    }
}
