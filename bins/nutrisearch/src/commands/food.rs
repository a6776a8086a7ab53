//! Food command - one record with a scaled portion

use super::{build_engine, log_request_budget, print_json, print_portion};
use anyhow::{bail, Result};
use nutrisearch_cli::{progress, OutputFormat, Status};
use nutrisearch_search::{scale_serving, NormalizedFoodItem, PortionResult};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
struct FoodOutput<'a> {
    food: &'a NormalizedFoodItem,
    portion: PortionResult,
}

/// Show food `fdc_id`
pub async fn run(config: Option<&str>, fdc_id: u64, grams: Option<f64>, format: OutputFormat) -> Result<()> {
    let engine = build_engine(config, None)?;

    let spinner = progress::spinner_for(format, &format!("Fetching food {fdc_id}..."));
    let item = match engine.food_details(fdc_id).await {
        Ok(item) => {
            spinner.finish_and_clear();
            item
        }
        Err(e) => {
            progress::finish_error(&spinner, "Lookup failed");
            return Err(e.into());
        }
    };

    log_request_budget(&engine);

    let Some(item) = item else {
        bail!("No food with FoodData Central id {fdc_id}");
    };

    let portion = match grams {
        Some(grams) => engine.scale_portion(&item, grams),
        None => scale_serving(&item),
    };

    if format == OutputFormat::Json {
        return print_json(&FoodOutput { food: &item, portion });
    }

    Status::header(&item.name);
    if let Some(brand) = &item.brand {
        println!("  {}", brand.dimmed());
    }
    println!("  {}", format!("fdc {}  confidence {:.2}", item.fdc_id, item.confidence).dimmed());
    if let Some(household) = item.serving.as_ref().and_then(|s| s.household.as_deref()) {
        println!("  {}", format!("serving: {household}").dimmed());
    }
    if !item.is_usable() {
        Status::warning("Record has no calorie data");
    }
    println!();
    print_portion(&portion);

    Ok(())
}
