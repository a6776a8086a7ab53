//! NutriSearch CLI - USDA FoodData Central search
//!
//! Finds the best matching foods for a free-text query and scales their
//! nutrients to a portion.

use clap::{Parser, Subcommand};
use nutrisearch_cli::{OutputFormat, Status};
use nutrisearch_telemetry::{LogFormat, TelemetryConfig};
use std::process::ExitCode;

mod commands;

use commands::{food, scale, search};

/// Search and rank USDA FoodData Central foods
#[derive(Parser)]
#[command(name = "nutrisearch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to nutrisearch.toml lookup)
    #[arg(short, long, global = true, env = "NUTRISEARCH_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search foods and print the best matches
    Search {
        /// Free-text query, e.g. "chicken breast"
        query: String,

        /// Number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Candidates to gather before ranking
        #[arg(short, long)]
        pool: Option<usize>,

        /// Show how each score was composed
        #[arg(short, long)]
        explain: bool,
    },

    /// Show one food by FoodData Central id
    Food {
        /// FoodData Central id
        fdc_id: u64,

        /// Portion weight; defaults to the label serving or 100 g
        #[arg(short, long)]
        grams: Option<f64>,
    },

    /// Scale per-100 g nutrients to a portion without contacting the provider
    Scale(scale::ScaleArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_format = match cli.format {
        OutputFormat::Text => LogFormat::Compact,
        OutputFormat::Json => LogFormat::Json,
    };
    if let Err(e) = nutrisearch_telemetry::init_with_config(TelemetryConfig::for_cli(cli.verbose, log_format)) {
        Status::warning(&format!("Logging disabled: {e}"));
    }

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Search {
            query,
            limit,
            pool,
            explain,
        } => search::run(config, &query, limit, pool, explain, cli.format).await,

        Commands::Food { fdc_id, grams } => food::run(config, fdc_id, grams, cli.format).await,

        Commands::Scale(args) => scale::run(&args, cli.format),
    };

    if cli.verbose {
        tracing::debug!(metrics = %nutrisearch_telemetry::metrics().export_json(), "Session metrics");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("Error: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
