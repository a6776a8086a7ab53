//! CLI command implementations

pub mod food;
pub mod scale;
pub mod search;

use anyhow::{Context, Result};
use nutrisearch_cli::output::format_amount;
use nutrisearch_engine::{EngineConfig, FoodSearchEngine};
use nutrisearch_search::PortionResult;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Engine from the config file and environment
fn build_engine(config_path: Option<&str>, pool: Option<usize>) -> Result<FoodSearchEngine> {
    let mut config = EngineConfig::load(config_path).context("Failed to load configuration")?;
    if let Some(pool) = pool {
        config = config.with_candidate_pool(pool);
    }
    tracing::debug!(
        base_url = %config.client.base_url,
        candidate_pool = config.candidate_pool,
        "Building search engine"
    );
    Ok(FoodSearchEngine::from_config(config)?)
}

/// Debug-log what is left of the key's request budget
fn log_request_budget(engine: &FoodSearchEngine) {
    let status = engine.source().rate_limit_status();
    tracing::debug!(
        available = status.available,
        max = status.max,
        next_token_in_ms = status.next_token_in.as_millis(),
        "Provider request budget"
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_portion(portion: &PortionResult) {
    println!(
        "  {} {}",
        format!("{} g:", portion.grams).dimmed(),
        format!("{} kcal", portion.calories).bold()
    );
    let rows = [
        ("Protein", portion.protein_g, "g"),
        ("Carbs", portion.carbs_g, "g"),
        ("Fat", portion.fat_g, "g"),
        ("Fiber", portion.fiber_g, "g"),
        ("Sugar", portion.sugar_g, "g"),
        ("Sodium", portion.sodium_mg, "mg"),
    ];
    for (label, value, unit) in rows {
        println!("    {label:<8} {}", format_amount(value, unit));
    }
}
