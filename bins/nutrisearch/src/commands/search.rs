//! Search command - rank foods for a query

use super::{build_engine, log_request_budget, print_json};
use anyhow::Result;
use nutrisearch_cli::output::{fit_width, format_count, format_duration};
use nutrisearch_cli::{progress, OutputFormat, Status};
use nutrisearch_engine::RankedSearch;
use nutrisearch_search::{NormalizedFoodItem, ScoreBreakdown, ScoredFoodItem};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::time::Instant;

const NAME_WIDTH: usize = 48;

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    total_hits: u64,
    results: Vec<&'a NormalizedFoodItem>,
}

/// Run a search
pub async fn run(
    config: Option<&str>,
    query: &str,
    limit: usize,
    pool: Option<usize>,
    explain: bool,
    format: OutputFormat,
) -> Result<()> {
    let engine = build_engine(config, pool)?;

    let spinner = progress::spinner_for(format, &format!("Searching for \"{query}\"..."));
    let started = Instant::now();
    let ranked = match engine.search_and_rank_detailed(query, limit).await {
        Ok(ranked) => {
            progress::finish_success(&spinner, &format_count(ranked.items.len(), "result", "results"));
            ranked
        }
        Err(e) => {
            progress::finish_error(&spinner, "Search failed");
            return Err(e.into());
        }
    };
    let elapsed = started.elapsed();
    log_request_budget(&engine);

    match format {
        OutputFormat::Json if explain => print_json(&ranked),
        OutputFormat::Json => print_json(&SearchOutput {
            query,
            total_hits: ranked.total_hits,
            results: ranked.items.iter().map(|scored| &scored.item).collect(),
        }),
        OutputFormat::Text => {
            print_text(query, &ranked, explain, elapsed);
            Ok(())
        }
    }
}

fn print_text(query: &str, ranked: &RankedSearch, explain: bool, elapsed: std::time::Duration) {
    for failure in &ranked.failures {
        Status::warning(&format!("Page {} skipped: {}", failure.page, failure.error));
    }

    if ranked.items.is_empty() {
        Status::info(&format!("No foods found for \"{query}\""));
        return;
    }

    Status::header(&format!("Results for \"{query}\""));
    for (rank, scored) in ranked.items.iter().enumerate() {
        print_row(rank + 1, scored);
        if explain {
            print_breakdown(&scored.breakdown);
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "{} of {} hits, {} considered, {}",
            ranked.items.len(),
            ranked.total_hits,
            ranked.candidates_considered,
            format_duration(elapsed)
        )
        .dimmed()
    );
}

fn print_row(rank: usize, scored: &ScoredFoodItem) {
    let item = &scored.item;
    let name = fit_width(&item.name, NAME_WIDTH);
    let brand = item
        .brand
        .as_deref()
        .map(|brand| format!(" ({brand})"))
        .unwrap_or_default();

    println!(
        "{:>3}. {}{}  {}  {}",
        rank,
        name.bold(),
        brand.dimmed(),
        format!("{:.0} kcal/100 g", item.nutrients.calories).cyan(),
        format!("[{} · {:.2}]", scored.data_type, scored.relevance_score).dimmed()
    );
    println!(
        "     {}",
        format!(
            "fdc {}  P {:.1} g  C {:.1} g  F {:.1} g",
            item.fdc_id, item.nutrients.protein_g, item.nutrients.carbs_g, item.nutrients.fat_g
        )
        .dimmed()
    );
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    let terms = [
        ("similarity", breakdown.similarity),
        ("brand", breakdown.brand),
        ("exact name", breakdown.exact_name),
        ("token", breakdown.token_match),
        ("prefix", breakdown.prefix),
        ("source", breakdown.source_priority),
        ("word count", breakdown.word_count),
        ("chain", breakdown.chain),
        ("complex dish", breakdown.complex_dish),
        ("ingredients", breakdown.ingredient_list),
        ("parenthetical", breakdown.parenthetical),
        ("basic cut", breakdown.basic_cut),
        ("preparation", breakdown.basic_preparation),
    ];

    let parts: Vec<String> = terms
        .iter()
        .filter(|(_, value)| *value != 0.0)
        .map(|(label, value)| format!("{label} {value:+.2}"))
        .collect();
    println!("     {}", parts.join(", ").yellow());
}
