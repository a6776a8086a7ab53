//! Mapping of provider nutrient codes onto the tracked nutrient set.

use crate::model::{NormalizedFoodItem, NutrientProfile, RawCandidate, RawNutrient};

/// Output field a nutrient code feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    /// kcal
    Calories,
    /// g
    Protein,
    /// g
    Carbs,
    /// g
    Fat,
    /// g
    Fiber,
    /// g
    Sugar,
    /// mg
    Sodium,
}

impl NutrientField {
    const COUNT: usize = 7;

    fn index(self) -> usize {
        self as usize
    }
}

/// FoodData Central nutrient ids, in precedence order.
///
/// When a record reports several codes for the same field the entry listed
/// first wins. Energy in kJ (1062) is intentionally absent.
pub const FDC_NUTRIENT_CODES: &[(u32, NutrientField)] = &[
    (1008, NutrientField::Calories), // Energy
    (2047, NutrientField::Calories), // Energy (Atwater General Factors)
    (2048, NutrientField::Calories), // Energy (Atwater Specific Factors)
    (1003, NutrientField::Protein),
    (1005, NutrientField::Carbs), // Carbohydrate, by difference
    (1004, NutrientField::Fat),   // Total lipid (fat)
    (1079, NutrientField::Fiber), // Fiber, total dietary
    (2000, NutrientField::Sugar), // Sugars, total including NLEA
    (1063, NutrientField::Sugar), // Sugars, Total NLEA
    (1093, NutrientField::Sodium),
];

/// Maps nutrient lists onto a [`NutrientProfile`] using a code table.
#[derive(Debug, Clone, Copy)]
pub struct NutrientNormalizer {
    codes: &'static [(u32, NutrientField)],
}

impl Default for NutrientNormalizer {
    fn default() -> Self {
        Self::new(FDC_NUTRIENT_CODES)
    }
}

impl NutrientNormalizer {
    /// Normalizer over a custom code table
    #[must_use]
    pub const fn new(codes: &'static [(u32, NutrientField)]) -> Self {
        Self { codes }
    }

    /// Build the nutrient profile for one record.
    ///
    /// Unknown codes are skipped, missing fields stay at zero and negative
    /// amounts are clamped to zero.
    #[must_use]
    pub fn normalize(&self, nutrients: &[RawNutrient]) -> NutrientProfile {
        // (precedence, value) per field; lower precedence index wins
        let mut best: [Option<(usize, f64)>; NutrientField::COUNT] = [None; NutrientField::COUNT];

        for nutrient in nutrients {
            let Some((precedence, field)) = self.lookup(nutrient.nutrient_id) else {
                continue;
            };
            let slot = &mut best[field.index()];
            if slot.is_none_or(|(current, _)| precedence < current) {
                *slot = Some((precedence, nutrient.value.max(0.0)));
            }
        }

        let value = |field: NutrientField| best[field.index()].map_or(0.0, |(_, v)| v);

        NutrientProfile {
            calories: value(NutrientField::Calories),
            protein_g: value(NutrientField::Protein),
            carbs_g: value(NutrientField::Carbs),
            fat_g: value(NutrientField::Fat),
            fiber_g: value(NutrientField::Fiber),
            sugar_g: value(NutrientField::Sugar),
            sodium_mg: value(NutrientField::Sodium),
        }
    }

    /// Convert a provider record into an application record.
    #[must_use]
    pub fn normalize_candidate(&self, candidate: &RawCandidate) -> NormalizedFoodItem {
        NormalizedFoodItem {
            fdc_id: candidate.fdc_id,
            name: candidate.description.trim().to_string(),
            brand: candidate.display_brand(),
            nutrients: self.normalize(&candidate.food_nutrients),
            confidence: candidate.data_type.confidence(),
            serving: candidate.serving_hint(),
        }
    }

    fn lookup(&self, nutrient_id: u32) -> Option<(usize, NutrientField)> {
        self.codes
            .iter()
            .enumerate()
            .find(|(_, (code, _))| *code == nutrient_id)
            .map(|(precedence, (_, field))| (precedence, *field))
    }
}
