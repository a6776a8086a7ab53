//! Food records as the provider sends them and as the application uses them.

use serde::{Deserialize, Serialize};

/// Provider classification of a record's authority, ordered most to least trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum DataType {
    /// Lab-analysed foundation foods
    #[serde(rename = "Foundation")]
    Foundation,
    /// Legacy standard reference
    #[serde(rename = "SR Legacy")]
    SrLegacy,
    /// Food and nutrient database for dietary studies
    #[serde(rename = "Survey (FNDDS)")]
    Survey,
    /// Manufacturer-reported label data
    #[serde(rename = "Branded")]
    Branded,
    /// Any category this crate does not know about
    #[serde(other)]
    #[default]
    Other,
}

impl DataType {
    /// Categories included in every search request.
    pub const SEARCHABLE: [DataType; 4] = [
        DataType::Foundation,
        DataType::SrLegacy,
        DataType::Survey,
        DataType::Branded,
    ];

    /// Wire name used by the provider
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Foundation => "Foundation",
            DataType::SrLegacy => "SR Legacy",
            DataType::Survey => "Survey (FNDDS)",
            DataType::Branded => "Branded",
            DataType::Other => "Other",
        }
    }

    /// Foundation and legacy reference data win ranking ties.
    #[must_use]
    pub fn is_basic(self) -> bool {
        matches!(self, DataType::Foundation | DataType::SrLegacy)
    }

    /// Confidence attached to normalized records from this source.
    #[must_use]
    pub fn confidence(self) -> f64 {
        match self {
            DataType::Foundation => 0.95,
            DataType::SrLegacy => 0.90,
            DataType::Survey => 0.85,
            DataType::Branded => 0.70,
            DataType::Other => 0.50,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One nutrient entry of a provider record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNutrient {
    /// Provider nutrient identifier (e.g. 1008 for energy in kcal)
    pub nutrient_id: u32,
    /// Legacy nutrient number (e.g. "208")
    #[serde(default)]
    pub nutrient_number: Option<String>,
    /// Display name
    #[serde(default)]
    pub nutrient_name: Option<String>,
    /// Unit of `value`
    #[serde(default)]
    pub unit_name: Option<String>,
    /// Amount per 100 g
    #[serde(default)]
    pub value: f64,
}

impl RawNutrient {
    /// Entry with only the fields the normalizer reads
    pub fn new(nutrient_id: u32, value: f64, unit: impl Into<String>) -> Self {
        Self {
            nutrient_id,
            nutrient_number: None,
            nutrient_name: None,
            unit_name: Some(unit.into()),
            value,
        }
    }
}

/// A food record exactly as returned by the provider search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    /// Provider identifier
    pub fdc_id: u64,
    /// Free-text description, used as the display name
    pub description: String,
    /// Manufacturer (branded records)
    #[serde(default)]
    pub brand_owner: Option<String>,
    /// Consumer-facing brand (branded records)
    #[serde(default)]
    pub brand_name: Option<String>,
    /// Source category
    #[serde(default)]
    pub data_type: DataType,
    /// Nutrient amounts per 100 g
    #[serde(default)]
    pub food_nutrients: Vec<RawNutrient>,
    /// Label serving size
    #[serde(default)]
    pub serving_size: Option<f64>,
    /// Unit of `serving_size`
    #[serde(default)]
    pub serving_size_unit: Option<String>,
    /// Household measure, e.g. "1 cup"
    #[serde(default)]
    pub household_serving_full_text: Option<String>,
}

impl RawCandidate {
    /// Minimal record; the remaining fields start empty.
    pub fn new(fdc_id: u64, description: impl Into<String>, data_type: DataType) -> Self {
        Self {
            fdc_id,
            description: description.into(),
            brand_owner: None,
            brand_name: None,
            data_type,
            food_nutrients: Vec::new(),
            serving_size: None,
            serving_size_unit: None,
            household_serving_full_text: None,
        }
    }

    /// Set the brand owner
    #[must_use]
    pub fn with_brand_owner(mut self, owner: impl Into<String>) -> Self {
        self.brand_owner = Some(owner.into());
        self
    }

    /// Append a nutrient entry
    #[must_use]
    pub fn with_nutrient(mut self, nutrient_id: u32, value: f64, unit: &str) -> Self {
        self.food_nutrients.push(RawNutrient::new(nutrient_id, value, unit));
        self
    }

    /// Set the label serving
    #[must_use]
    pub fn with_serving(mut self, size: f64, unit: impl Into<String>) -> Self {
        self.serving_size = Some(size);
        self.serving_size_unit = Some(unit.into());
        self
    }

    /// Brand owner and brand name joined, for matching against the query.
    #[must_use]
    pub fn brand_text(&self) -> Option<String> {
        match (self.brand_owner.as_deref(), self.brand_name.as_deref()) {
            (Some(owner), Some(name)) if owner != name => Some(format!("{owner} {name}")),
            (Some(owner), _) => Some(owner.to_string()),
            (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }

    /// Brand shown to users: the consumer brand, else the manufacturer.
    #[must_use]
    pub fn display_brand(&self) -> Option<String> {
        self.brand_name
            .as_ref()
            .or(self.brand_owner.as_ref())
            .filter(|brand| !brand.trim().is_empty())
            .cloned()
    }

    /// Serving hint, if the record carries a positive serving size.
    #[must_use]
    pub fn serving_hint(&self) -> Option<ServingHint> {
        let size = self.serving_size.filter(|size| *size > 0.0)?;
        Some(ServingHint {
            size,
            unit: self.serving_size_unit.clone().unwrap_or_else(|| "g".to_string()),
            household: self.household_serving_full_text.clone(),
        })
    }
}

/// Per-100 g amounts of the nutrients the application tracks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrate in grams
    pub carbs_g: f64,
    /// Total fat in grams
    pub fat_g: f64,
    /// Dietary fiber in grams
    pub fiber_g: f64,
    /// Total sugars in grams
    pub sugar_g: f64,
    /// Sodium in milligrams
    pub sodium_mg: f64,
}

/// Serving information printed on a product label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingHint {
    /// Serving amount
    pub size: f64,
    /// Unit of `size` as the provider spells it ("g", "GRM", "ml", ...)
    pub unit: String,
    /// Household measure, e.g. "1 cup"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household: Option<String>,
}

impl ServingHint {
    /// Serving size in grams when the unit is mass or (water-density) volume.
    #[must_use]
    pub fn grams(&self) -> Option<f64> {
        match self.unit.to_ascii_lowercase().as_str() {
            "g" | "grm" | "gram" | "grams" | "ml" | "mlt" => Some(self.size),
            _ => None,
        }
    }
}

/// A food record in application terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFoodItem {
    /// Provider identifier
    pub fdc_id: u64,
    /// Display name
    pub name: String,
    /// Brand, for branded records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Nutrients per 100 g
    pub nutrients: NutrientProfile,
    /// Trust in the record, derived from its source category
    pub confidence: f64,
    /// Label serving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving: Option<ServingHint>,
}

impl NormalizedFoodItem {
    /// A record without calories cannot be logged.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.nutrients.calories > 0.0
    }
}
