//! Shared domain types and the built-in country table.

mod countries;
mod types;

pub use countries::{builtin_countries, CountryConfig};
pub use types::{DisplayMode, Quantity, RunConfig};
