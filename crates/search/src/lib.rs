//! Food record normalization, relevance scoring and ranking for NutriSearch.
//!
//! This crate is the pure half of the search engine; it never touches the
//! network. It provides:
//! - FoodData Central record types and nutrient normalization
//! - Bounded name/query similarity with a Levenshtein fallback
//! - Table-driven relevance scoring with per-term breakdowns
//! - Deterministic ranking with a total tie-break order
//! - Portion scaling from per-100 g values
//!
//! # Example
//!
//! ```rust
//! use nutrisearch_search::{DataType, RawCandidate, ResultRanker};
//!
//! let candidates = vec![
//!     RawCandidate::new(1, "Bananas, raw", DataType::SrLegacy).with_nutrient(1008, 89.0, "KCAL"),
//!     RawCandidate::new(2, "Banana chips", DataType::Branded).with_nutrient(1008, 519.0, "KCAL"),
//! ];
//!
//! let ranked = ResultRanker::default().rank(&candidates, "banana", 10);
//! assert_eq!(ranked.len(), 2);
//! ```

pub mod model;
pub mod nutrients;
pub mod portion;
pub mod ranking;
pub mod relevance;
pub mod similarity;

#[cfg(feature = "wasm")]
mod wasm;

pub use model::{DataType, NormalizedFoodItem, NutrientProfile, RawCandidate, RawNutrient, ServingHint};
pub use nutrients::{NutrientField, NutrientNormalizer, FDC_NUTRIENT_CODES};
pub use portion::{scale_portion, scale_serving, PortionResult};
pub use ranking::{compare_scored, ResultRanker, ScoredFoodItem};
pub use relevance::{word_count_adjustment, RelevanceScorer, ScoreBreakdown, ScoringTables, SourcePriority};
pub use similarity::{levenshtein_distance, similarity};
