//! Scaling per-100 g nutrient amounts to a chosen portion.

use crate::model::NormalizedFoodItem;
use serde::{Deserialize, Serialize};

/// Grams the provider reports nutrient amounts against.
pub const REFERENCE_GRAMS: f64 = 100.0;

/// Nutrients contained in one portion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortionResult {
    /// Portion weight
    pub grams: f64,
    /// Energy, rounded to whole kcal
    pub calories: i64,
    /// Protein, 1 decimal
    pub protein_g: f64,
    /// Carbohydrate, 1 decimal
    pub carbs_g: f64,
    /// Fat, 1 decimal
    pub fat_g: f64,
    /// Fiber, 1 decimal
    pub fiber_g: f64,
    /// Sugar, 1 decimal
    pub sugar_g: f64,
    /// Sodium in mg, 1 decimal
    pub sodium_mg: f64,
}

/// Scale `item` to `grams`.
///
/// Zero or negative weights are not rejected; they scale linearly like any
/// other value.
#[must_use]
pub fn scale_portion(item: &NormalizedFoodItem, grams: f64) -> PortionResult {
    let multiplier = grams / REFERENCE_GRAMS;
    let n = &item.nutrients;

    PortionResult {
        grams,
        calories: round_kcal(n.calories * multiplier),
        protein_g: round1(n.protein_g * multiplier),
        carbs_g: round1(n.carbs_g * multiplier),
        fat_g: round1(n.fat_g * multiplier),
        fiber_g: round1(n.fiber_g * multiplier),
        sugar_g: round1(n.sugar_g * multiplier),
        sodium_mg: round1(n.sodium_mg * multiplier),
    }
}

/// Scale `item` to its label serving, or to 100 g when the serving is not
/// expressed in grams or millilitres.
#[must_use]
pub fn scale_serving(item: &NormalizedFoodItem) -> PortionResult {
    let grams = item
        .serving
        .as_ref()
        .and_then(crate::model::ServingHint::grams)
        .unwrap_or(REFERENCE_GRAMS);
    scale_portion(item, grams)
}

#[allow(clippy::cast_possible_truncation)]
fn round_kcal(value: f64) -> i64 {
    // f64::round is half away from zero
    value.round() as i64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
