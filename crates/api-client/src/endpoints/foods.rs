//! Food detail endpoint
//!
//! Maps to `GET /food/{fdcId}`. Detail records nest nutrient metadata
//! (`{nutrient: {id, number, name, unitName}, amount}`), unlike the flat
//! entries of search results; both are converted to the same shape here.

use crate::client::FoodDataClient;
use crate::error::ApiResult;
use nutrisearch_search::{DataType, RawCandidate, RawNutrient};
use serde::Deserialize;

/// Food detail API interface
#[derive(Clone)]
pub struct FoodsApi {
    client: FoodDataClient,
}

impl FoodsApi {
    pub(crate) fn new(client: FoodDataClient) -> Self {
        Self { client }
    }

    /// Full record for one food; `None` when the provider has no such id.
    ///
    /// GET /food/{fdc_id}
    pub async fn get(&self, fdc_id: u64) -> ApiResult<Option<RawCandidate>> {
        let detail: Option<FoodDetail> = self.client.get_optional(&format!("food/{fdc_id}")).await?;
        Ok(detail.map(FoodDetail::into_candidate))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodDetail {
    fdc_id: u64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    data_type: DataType,
    #[serde(default)]
    brand_owner: Option<String>,
    #[serde(default)]
    brand_name: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<DetailNutrient>,
    #[serde(default)]
    serving_size: Option<f64>,
    #[serde(default)]
    serving_size_unit: Option<String>,
    #[serde(default)]
    household_serving_full_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailNutrient {
    nutrient: Option<NutrientMeta>,
    #[serde(default)]
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NutrientMeta {
    id: u32,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    unit_name: Option<String>,
}

impl FoodDetail {
    fn into_candidate(self) -> RawCandidate {
        let food_nutrients = self
            .food_nutrients
            .into_iter()
            .filter_map(|entry| {
                // Entries without metadata or amount carry nothing usable
                let meta = entry.nutrient?;
                Some(RawNutrient {
                    nutrient_id: meta.id,
                    nutrient_number: meta.number,
                    nutrient_name: meta.name,
                    unit_name: meta.unit_name,
                    value: entry.amount?,
                })
            })
            .collect();

        RawCandidate {
            fdc_id: self.fdc_id,
            description: self.description,
            brand_owner: self.brand_owner,
            brand_name: self.brand_name,
            data_type: self.data_type,
            food_nutrients,
            serving_size: self.serving_size,
            serving_size_unit: self.serving_size_unit,
            household_serving_full_text: self.household_serving_full_text,
        }
    }
}
