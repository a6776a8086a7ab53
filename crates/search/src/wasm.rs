//! WASM bindings for food search utilities.

use crate::model::{NormalizedFoodItem, RawCandidate};
use crate::ranking::ResultRanker;
use wasm_bindgen::prelude::*;

/// Case-insensitive similarity between a food name and a query.
///
/// # Returns
/// A value in `[0, 1]`, higher is closer
#[wasm_bindgen]
pub fn name_similarity(name: &str, query: &str) -> f64 {
    crate::similarity(name, query)
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

/// Rank provider records and return the best ones as JSON.
///
/// # Arguments
/// * `query` - Search query
/// * `candidates_json` - JSON array of FoodData Central search results
/// * `limit` - Maximum results to return
///
/// # Returns
/// JSON array of normalized food items, best first; `[]` on malformed input
#[wasm_bindgen]
pub fn rank_foods(query: &str, candidates_json: &str, limit: usize) -> String {
    let Ok(candidates) = serde_json::from_str::<Vec<RawCandidate>>(candidates_json) else {
        return "[]".to_string();
    };

    let ranked = ResultRanker::default().rank(&candidates, query, limit);
    serde_json::to_string(&ranked).unwrap_or_else(|_| "[]".to_string())
}

/// Scale a normalized food item (JSON) to `grams`.
///
/// # Returns
/// JSON portion result, or `null` on malformed input
#[wasm_bindgen]
pub fn scale_food_portion(item_json: &str, grams: f64) -> String {
    let Ok(item) = serde_json::from_str::<NormalizedFoodItem>(item_json) else {
        return "null".to_string();
    };

    serde_json::to_string(&crate::scale_portion(&item, grams)).unwrap_or_else(|_| "null".to_string())
}
