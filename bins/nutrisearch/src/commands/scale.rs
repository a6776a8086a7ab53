//! Scale command - offline portion arithmetic

use super::{print_json, print_portion};
use anyhow::{ensure, Result};
use clap::Args;
use nutrisearch_cli::{OutputFormat, Status};
use nutrisearch_search::{scale_portion, NormalizedFoodItem, NutrientProfile};

/// Per-100 g nutrients and the portion to scale them to
#[derive(Debug, Args)]
pub struct ScaleArgs {
    /// Energy in kcal per 100 g
    #[arg(long)]
    pub calories: f64,

    /// Protein in g per 100 g
    #[arg(long, default_value_t = 0.0)]
    pub protein: f64,

    /// Carbohydrate in g per 100 g
    #[arg(long, default_value_t = 0.0)]
    pub carbs: f64,

    /// Fat in g per 100 g
    #[arg(long, default_value_t = 0.0)]
    pub fat: f64,

    /// Fiber in g per 100 g
    #[arg(long, default_value_t = 0.0)]
    pub fiber: f64,

    /// Sugar in g per 100 g
    #[arg(long, default_value_t = 0.0)]
    pub sugar: f64,

    /// Sodium in mg per 100 g
    #[arg(long, default_value_t = 0.0)]
    pub sodium: f64,

    /// Portion weight in grams
    #[arg(short, long, allow_negative_numbers = true)]
    pub grams: f64,

    /// Label for text output
    #[arg(long, default_value = "Custom food")]
    pub name: String,
}

impl ScaleArgs {
    fn to_item(&self) -> NormalizedFoodItem {
        NormalizedFoodItem {
            fdc_id: 0,
            name: self.name.clone(),
            brand: None,
            nutrients: NutrientProfile {
                calories: self.calories,
                protein_g: self.protein,
                carbs_g: self.carbs,
                fat_g: self.fat,
                fiber_g: self.fiber,
                sugar_g: self.sugar,
                sodium_mg: self.sodium,
            },
            confidence: 1.0,
            serving: None,
        }
    }
}

/// Scale the given nutrients
pub fn run(args: &ScaleArgs, format: OutputFormat) -> Result<()> {
    let nutrients = [
        args.calories,
        args.protein,
        args.carbs,
        args.fat,
        args.fiber,
        args.sugar,
        args.sodium,
    ];
    ensure!(
        nutrients.iter().all(|v| v.is_finite() && *v >= 0.0),
        "Nutrient amounts must be non-negative numbers"
    );
    ensure!(args.grams.is_finite(), "Portion weight must be a number");

    let portion = scale_portion(&args.to_item(), args.grams);

    if format == OutputFormat::Json {
        return print_json(&portion);
    }

    if args.grams <= 0.0 {
        Status::warning("Portion weight is not positive");
    }
    Status::header(&args.name);
    print_portion(&portion);
    Ok(())
}
