//! Observation series extraction from the raw cumulative CSV.

mod extract;

pub use extract::{extract_series, ExtractError, ObservationSeries};
