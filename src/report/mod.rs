//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the extraction/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{CountryConfig, Quantity, RunConfig};
use crate::fit::ExpFit;
use crate::series::ObservationSeries;

/// Header printed once at the start of a run.
pub fn format_run_header(config: &RunConfig) -> String {
    let quantities: Vec<&str> = config.quantities.iter().map(|q| q.label()).collect();
    let countries: Vec<&str> = config.countries.iter().map(|c| c.name.as_str()).collect();

    let mut out = String::new();
    out.push_str("=== epi - exponential growth fit ===\n");
    out.push_str(&format!("Quantities: {}\n", quantities.join(", ")));
    out.push_str(&format!("Countries: {}\n", countries.join(", ")));
    out.push_str(&format!(
        "Horizon: +{}d | mode: {:?} | plots: {}",
        config.future_days,
        config.mode,
        config.plots_dir.display()
    ));
    out
}

/// One-line fit summary for a country.
pub fn format_country_summary(
    country: &CountryConfig,
    quantity: Quantity,
    series: &ObservationSeries,
    fit: &ExpFit,
    projection: &[(chrono::NaiveDate, f64)],
) -> String {
    let window = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => format!("{first}..{last}"),
        _ => "-".to_string(),
    };

    let doubling = match fit.doubling_time_days() {
        Some(days) => format!("{days:.1}d"),
        None => "n/a".to_string(),
    };

    let horizon = match projection.last() {
        Some((date, value)) => format!("{date}: {:.0}", value),
        None => "-".to_string(),
    };

    format!(
        "{} [{}]: n={} | {} | growth {:+.1}%/day | doubling {} | modeled {}",
        country.name,
        quantity.label(),
        series.len(),
        window,
        fit.daily_growth_rate() * 100.0,
        doubling,
        horizon,
    )
}

/// Notice printed when a country/quantity pair has nothing to fit.
pub fn format_skip_notice(country: &CountryConfig, quantity: Quantity) -> String {
    format!(
        "{} [{}]: all counts are zero, skipping.",
        country.name,
        quantity.label()
    )
}
