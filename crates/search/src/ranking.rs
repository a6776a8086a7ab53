//! Ordering of scored search results.

use crate::model::{DataType, NormalizedFoodItem, RawCandidate};
use crate::nutrients::NutrientNormalizer;
use crate::relevance::{RelevanceScorer, ScoreBreakdown};
use serde::Serialize;
use std::cmp::Ordering;
use unicode_segmentation::UnicodeSegmentation;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A normalized record with the data needed to rank it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFoodItem {
    /// The normalized record
    pub item: NormalizedFoodItem,
    /// Source category of the raw record
    pub data_type: DataType,
    /// Relevance to the query, never negative
    pub relevance_score: f64,
    /// Per-term contributions to `relevance_score`
    pub breakdown: ScoreBreakdown,
}

impl ScoredFoodItem {
    fn name_length(&self) -> usize {
        self.item.name.graphemes(true).count()
    }
}

/// Total order used for results: best first.
///
/// Higher score, then basic reference data, then the shorter name, then the
/// lower provider id.
#[must_use]
pub fn compare_scored(a: &ScoredFoodItem, b: &ScoredFoodItem) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| b.data_type.is_basic().cmp(&a.data_type.is_basic()))
        .then_with(|| a.name_length().cmp(&b.name_length()))
        .then_with(|| a.item.fdc_id.cmp(&b.item.fdc_id))
}

/// Normalizes, scores and orders provider records.
#[derive(Debug, Clone, Default)]
pub struct ResultRanker {
    normalizer: NutrientNormalizer,
    scorer: RelevanceScorer,
}

impl ResultRanker {
    /// Ranker with custom components
    #[must_use]
    pub fn new(normalizer: NutrientNormalizer, scorer: RelevanceScorer) -> Self {
        Self { normalizer, scorer }
    }

    /// The scorer in use
    #[must_use]
    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    /// The normalizer in use
    #[must_use]
    pub fn normalizer(&self) -> &NutrientNormalizer {
        &self.normalizer
    }

    /// Best `limit` records for `query`.
    #[must_use]
    pub fn rank(&self, candidates: &[RawCandidate], query: &str, limit: usize) -> Vec<NormalizedFoodItem> {
        self.rank_scored(candidates, query, limit)
            .into_iter()
            .map(|scored| scored.item)
            .collect()
    }

    /// Like [`rank`](Self::rank) but keeps scores and source categories.
    ///
    /// Records without calories are dropped before sorting.
    #[must_use]
    pub fn rank_scored(&self, candidates: &[RawCandidate], query: &str, limit: usize) -> Vec<ScoredFoodItem> {
        let mut scored = self.score_all(candidates, query);
        scored.sort_by(compare_scored);
        scored.truncate(limit);
        scored
    }

    #[cfg(feature = "parallel")]
    fn score_all(&self, candidates: &[RawCandidate], query: &str) -> Vec<ScoredFoodItem> {
        candidates
            .par_iter()
            .filter_map(|candidate| self.score_one(candidate, query))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, candidates: &[RawCandidate], query: &str) -> Vec<ScoredFoodItem> {
        candidates
            .iter()
            .filter_map(|candidate| self.score_one(candidate, query))
            .collect()
    }

    fn score_one(&self, candidate: &RawCandidate, query: &str) -> Option<ScoredFoodItem> {
        let item = self.normalizer.normalize_candidate(candidate);
        if !item.is_usable() {
            return None;
        }
        let breakdown = self.scorer.breakdown(candidate, query);
        Some(ScoredFoodItem {
            item,
            data_type: candidate.data_type,
            relevance_score: breakdown.total(),
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(fdc_id: u64, name: &str, data_type: DataType, kcal: f64) -> RawCandidate {
        RawCandidate::new(fdc_id, name, data_type).with_nutrient(1008, kcal, "KCAL")
    }

    fn scored(fdc_id: u64, name: &str, data_type: DataType, score: f64) -> ScoredFoodItem {
        let item = NutrientNormalizer::default().normalize_candidate(&food(fdc_id, name, data_type, 100.0));
        ScoredFoodItem {
            item,
            data_type,
            relevance_score: score,
            breakdown: ScoreBreakdown::default(),
        }
    }

    #[test]
    fn test_zero_calorie_records_are_dropped() {
        let candidates = vec![
            food(1, "Water", DataType::Foundation, 0.0),
            food(2, "Water, flavored", DataType::Branded, 4.0),
            RawCandidate::new(3, "Water, bottled", DataType::SrLegacy),
        ];

        let ranked = ResultRanker::default().rank(&candidates, "water", 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].fdc_id, 2);
    }

    #[test]
    fn test_limit_truncates() {
        let candidates: Vec<_> = (1..=30)
            .map(|id| food(id, &format!("Rice variety {id}"), DataType::Branded, 130.0))
            .collect();
        assert_eq!(ResultRanker::default().rank(&candidates, "rice", 7).len(), 7);
        assert!(ResultRanker::default().rank(&candidates, "rice", 0).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(ResultRanker::default().rank(&[], "anything", 10).is_empty());
    }

    #[test]
    fn test_basic_category_breaks_score_ties() {
        let branded = scored(1, "Oats", DataType::Branded, 1.5);
        let foundation = scored(2, "Oats", DataType::Foundation, 1.5);
        let survey = scored(3, "Oats", DataType::Survey, 1.5);

        let mut items = vec![branded, survey, foundation];
        items.sort_by(compare_scored);
        assert_eq!(items[0].item.fdc_id, 2);
    }

    #[test]
    fn test_shorter_name_breaks_remaining_ties() {
        let long = scored(1, "Oats, rolled", DataType::Foundation, 1.5);
        let short = scored(2, "Oats", DataType::SrLegacy, 1.5);

        let mut items = vec![long, short];
        items.sort_by(compare_scored);
        assert_eq!(items[0].item.name, "Oats");
    }

    #[test]
    fn test_name_length_counts_graphemes() {
        // "crème" with a combining accent is five graphemes but six chars
        let combining = scored(1, "cre\u{300}me", DataType::Foundation, 1.0);
        let plain = scored(2, "creams", DataType::Foundation, 1.0);

        let mut items = vec![plain, combining];
        items.sort_by(compare_scored);
        assert_eq!(items[0].item.fdc_id, 1);
    }

    #[test]
    fn test_fdc_id_is_final_tie_break() {
        let mut items = vec![
            scored(9, "Milk", DataType::Branded, 1.0),
            scored(4, "Milk", DataType::Branded, 1.0),
        ];
        items.sort_by(compare_scored);
        assert_eq!(items[0].item.fdc_id, 4);
    }

    #[test]
    fn test_score_dominates_tie_breaks() {
        let mut items = vec![
            scored(1, "Egg", DataType::Foundation, 1.0),
            scored(2, "Egg substitute, liquid, fat free", DataType::Branded, 1.1),
        ];
        items.sort_by(compare_scored);
        assert_eq!(items[0].item.fdc_id, 2);
    }

    #[test]
    fn test_rank_scored_keeps_breakdown() {
        let candidates = vec![food(5, "Banana", DataType::Foundation, 89.0)];
        let scored = ResultRanker::default().rank_scored(&candidates, "banana", 5);

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].data_type, DataType::Foundation);
        assert_eq!(scored[0].relevance_score, scored[0].breakdown.total());
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let candidates: Vec<_> = (1..=50)
            .rev()
            .map(|id| food(id, "Apple", DataType::Branded, 52.0))
            .collect();

        let ranker = ResultRanker::default();
        let first = ranker.rank(&candidates, "apple", 50);
        let second = ranker.rank(&candidates, "apple", 50);

        assert_eq!(first, second);
        let ids: Vec<_> = first.iter().map(|item| item.fdc_id).collect();
        assert_eq!(ids, (1..=50).collect::<Vec<_>>());
    }
}
