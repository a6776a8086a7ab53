//! CLI utilities for NutriSearch
//!
//! Provides shared CLI functionality:
//! - Output format selection
//! - Status messages and value formatting
//! - Progress spinners

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status};
