//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! extraction/fitting/plotting code. Everything here resolves into a
//! [`RunConfig`](crate::domain::RunConfig) before the pipeline starts.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::{DisplayMode, Quantity};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "epi",
    version,
    about = "Fit and extrapolate exponential growth of epidemic case counts"
)]
pub struct Cli {
    /// Which cumulative quantity to analyze.
    #[arg(short = 'q', long, value_enum, default_value_t = QuantitySelection::Cases)]
    pub quantity: QuantitySelection,

    /// Restrict the run to these configured countries (repeatable).
    ///
    /// Defaults to every country in the built-in table.
    #[arg(short = 'c', long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    /// Extrapolation horizon: days beyond the last observation.
    #[arg(long, default_value_t = 7)]
    pub future_days: u32,

    /// Scaling of the chart's primary (log) axis.
    #[arg(long, value_enum, default_value_t = DisplayMode::PerCapita)]
    pub mode: DisplayMode,

    /// Directory for cached input files.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory for rendered charts.
    #[arg(long, default_value = "plots")]
    pub plots_dir: PathBuf,

    /// Use cached input files only; never touch the network.
    #[arg(long)]
    pub offline: bool,

    /// Chart width in pixels.
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Chart height in pixels.
    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

/// Quantity selection, including the convenience `both`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuantitySelection {
    Cases,
    Deaths,
    Both,
}

impl QuantitySelection {
    /// Concrete quantities to run, in order.
    pub fn quantities(self) -> Vec<Quantity> {
        match self {
            QuantitySelection::Cases => vec![Quantity::Cases],
            QuantitySelection::Deaths => vec![Quantity::Deaths],
            QuantitySelection::Both => Quantity::ALL.to_vec(),
        }
    }
}
