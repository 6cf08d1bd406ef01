//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves them against the built-in country table
//! - runs the fetch -> extract -> fit -> project -> plot pipeline

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{builtin_countries, CountryConfig, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `epi` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = run_config_from_cli(&cli)?;
    pipeline::run(&config)
}

/// Resolve CLI arguments into a full run configuration.
///
/// Country names must match the built-in table exactly; an unknown name is a
/// usage error listing the configured countries.
pub fn run_config_from_cli(cli: &Cli) -> Result<RunConfig, AppError> {
    let table = builtin_countries();

    let countries: Vec<CountryConfig> = if cli.countries.is_empty() {
        table
    } else {
        cli.countries
            .iter()
            .map(|name| {
                table
                    .iter()
                    .find(|c| &c.name == name)
                    .cloned()
                    .ok_or_else(|| {
                        let known: Vec<&str> = table.iter().map(|c| c.name.as_str()).collect();
                        AppError::new(
                            2,
                            format!(
                                "Unknown country '{name}'. Configured countries: {}.",
                                known.join(", ")
                            ),
                        )
                    })
            })
            .collect::<Result<_, _>>()?
    };

    Ok(RunConfig {
        quantities: cli.quantity.quantities(),
        countries,
        future_days: cli.future_days,
        mode: cli.mode,
        data_dir: cli.data_dir.clone(),
        plots_dir: cli.plots_dir.clone(),
        offline: cli.offline,
        plot_width: cli.width,
        plot_height: cli.height,
    })
}
