//! Endpoint-specific API implementations
//!
//! ## Mapping to FoodData Central
//!
//! | Module | Endpoint | Description |
//! |--------|----------|-------------|
//! | `search` | `POST foods/search` | Paginated keyword search |
//! | `foods` | `GET food/{fdcId}` | Full record for one food |

pub mod foods;
pub mod search;

pub use foods::FoodsApi;
pub use search::{SearchApi, SearchPage, SearchRequest};
