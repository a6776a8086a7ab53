//! Configuration loading and schema definitions
//!
//! Settings shared by the provider client, the search engine and the CLI.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
