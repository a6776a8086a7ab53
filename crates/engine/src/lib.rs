//! Comprehensive food search for NutriSearch
//!
//! Ties the provider client to the pure ranking pipeline: gather a candidate
//! pool across several FoodData Central result pages, normalize, score, sort,
//! and hand back the best records.
//!
//! # Example
//!
//! ```rust,no_run
//! use nutrisearch_engine::FoodSearchEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = FoodSearchEngine::from_env()?;
//!
//!     let results = engine.search_and_rank("chicken breast", 10).await?;
//!     if let Some(best) = results.first() {
//!         let portion = engine.scale_portion(best, 150.0);
//!         println!("{}: {} kcal in 150 g", best.name, portion.calories);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod error;
pub mod orchestrator;

pub use config::EngineConfig;
pub use engine::{FoodSearchEngine, RankedSearch};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{ComprehensiveSearch, PageFailure, SearchOutcome, SearchSettings};
