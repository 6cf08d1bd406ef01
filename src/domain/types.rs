//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can
//! be:
//!
//! - used in-memory during extraction/fitting
//! - embedded in exported artifacts later without rework

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::CountryConfig;

/// Which cumulative quantity to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Cumulative diagnosed cases.
    Cases,
    /// Cumulative deaths.
    Deaths,
}

impl Quantity {
    pub const ALL: [Quantity; 2] = [Quantity::Cases, Quantity::Deaths];

    /// File name of the published CSV for this quantity (also the cache name).
    pub fn file_name(self) -> &'static str {
        match self {
            Quantity::Cases => "total_cases.csv",
            Quantity::Deaths => "total_deaths.csv",
        }
    }

    /// Short label used in output paths and summary lines.
    pub fn label(self) -> &'static str {
        match self {
            Quantity::Cases => "cases",
            Quantity::Deaths => "deaths",
        }
    }
}

/// How counts are scaled on the chart's primary (log) axis.
///
/// Raw counts always appear on the secondary axis; this mode only controls
/// the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Counts divided by the country's population.
    PerCapita,
    /// Counts as a percentage of the country's population.
    Percent,
    /// Unscaled counts.
    Raw,
}

impl DisplayMode {
    /// Multiplier applied to a raw count for the primary axis.
    pub fn scale(self, population: f64) -> f64 {
        match self {
            DisplayMode::PerCapita => 1.0 / population,
            DisplayMode::Percent => 100.0 / population,
            DisplayMode::Raw => 1.0,
        }
    }

    /// Primary-axis label for the given quantity.
    pub fn axis_label(self, quantity: Quantity) -> String {
        match self {
            DisplayMode::PerCapita => format!("{} / population", quantity.label()),
            DisplayMode::Percent => format!("{} (% of population)", quantity.label()),
            DisplayMode::Raw => quantity.label().to_string(),
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Quantities to analyze, in order.
    pub quantities: Vec<Quantity>,
    /// Countries to analyze, in order.
    pub countries: Vec<CountryConfig>,
    /// Extrapolation horizon in calendar days beyond the last observation.
    pub future_days: u32,
    /// Scaling of the chart's primary axis.
    pub mode: DisplayMode,
    /// Directory for cached input files.
    pub data_dir: PathBuf,
    /// Directory for rendered charts.
    pub plots_dir: PathBuf,
    /// Use cached input files only; never touch the network.
    pub offline: bool,
    /// Chart raster size in pixels.
    pub plot_width: u32,
    pub plot_height: u32,
}
