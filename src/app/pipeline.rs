//! The per-run pipeline: fetch -> extract -> fit -> project -> plot.
//!
//! Keeping this in one place separates the workflow from presentation: the
//! analysis of one (country, quantity) pair works on any reader, so tests can
//! drive it with in-memory CSV data while `run` wires in files and charts.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::data;
use crate::domain::{CountryConfig, Quantity, RunConfig};
use crate::error::AppError;
use crate::fit::{fit_log_linear, project, ExpFit};
use crate::plot::{render_chart, ChartSpec};
use crate::report;
use crate::series::{extract_series, ObservationSeries};

/// Analysis result for one (country, quantity) pair, before plotting.
#[derive(Debug, Clone)]
pub enum CountryAnalysis {
    Fitted {
        series: ObservationSeries,
        fit: ExpFit,
        projection: Vec<(NaiveDate, f64)>,
    },
    /// Nothing to fit (e.g. no deaths reported yet). Not fatal.
    AllZero,
}

/// Execute the full run: every quantity, every configured country.
pub fn run(config: &RunConfig) -> Result<(), AppError> {
    println!("{}", report::format_run_header(config));

    let client = Client::new();

    for &quantity in &config.quantities {
        let input = input_file(&client, quantity, config)?;

        for country in &config.countries {
            let file = File::open(&input).map_err(|e| {
                AppError::new(
                    4,
                    format!("Failed to open input file '{}': {e}", input.display()),
                )
            })?;

            match analyze_country(file, country, quantity, config.future_days)? {
                CountryAnalysis::AllZero => {
                    println!("{}", report::format_skip_notice(country, quantity));
                }
                CountryAnalysis::Fitted {
                    series,
                    fit,
                    projection,
                } => {
                    let spec = ChartSpec {
                        country,
                        quantity,
                        mode: config.mode,
                        series: &series,
                        projection: &projection,
                        width: config.plot_width,
                        height: config.plot_height,
                    };
                    render_chart(&spec, &config.plots_dir)?;

                    println!(
                        "{}",
                        report::format_country_summary(
                            country, quantity, &series, &fit, &projection
                        )
                    );
                }
            }
        }
    }

    Ok(())
}

/// Resolve the input file for a quantity: cached in offline mode, freshly
/// fetched otherwise. Any fetch failure aborts the whole run.
fn input_file(client: &Client, quantity: Quantity, config: &RunConfig) -> Result<PathBuf, AppError> {
    if config.offline {
        let path = data::cached_path(&config.data_dir, quantity);
        if path.exists() {
            return Ok(path);
        }
        return Err(AppError::new(
            2,
            format!(
                "Offline mode, but no cached file at '{}'. Run once without --offline first.",
                path.display()
            ),
        ));
    }

    data::fetch_quantity_file(client, quantity, &config.data_dir).map_err(|e| {
        let hint = if e.is_transient() {
            " This looks transient; retrying later may succeed."
        } else {
            ""
        };
        AppError::new(4, format!("{e}{hint}"))
    })
}

/// Extract, validate, fit, and project one country from raw CSV data.
///
/// Extraction and fit failures are fatal and name the country; an all-zero
/// (or empty) series is reported as [`CountryAnalysis::AllZero`] instead so
/// the caller can skip it.
pub fn analyze_country<R: Read>(
    reader: R,
    country: &CountryConfig,
    quantity: Quantity,
    future_days: u32,
) -> Result<CountryAnalysis, AppError> {
    let series = extract_series(reader, &country.name, country.start_date).map_err(|e| {
        AppError::new(
            3,
            format!("{} [{}]: {e}", country.name, quantity.label()),
        )
    })?;

    if series.is_all_zero() {
        return Ok(CountryAnalysis::AllZero);
    }

    let fit = fit_log_linear(&series).map_err(|e| {
        AppError::new(
            3,
            format!("{} [{}]: {e}", country.name, quantity.label()),
        )
    })?;

    let projection = project(&fit, &series, future_days);

    Ok(CountryAnalysis::Fitted {
        series,
        fit,
        projection,
    })
}
