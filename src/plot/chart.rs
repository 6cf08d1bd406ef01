//! Observed-vs-model chart for one (country, quantity) pair.
//!
//! The chart is intentionally data-driven: series and bounds are computed
//! before any drawing, so the Plotters code stays focused on presentation and
//! the data prep is testable on its own.
//!
//! Layout: calendar dates on x; the population-normalized rate on the left
//! axis (log scale, per the configured display mode); raw counts mirrored on
//! the right axis. Observed counts are red markers, the fitted/extrapolated
//! model is a blue line.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use plotters::prelude::*;

use crate::domain::{CountryConfig, DisplayMode, Quantity};
use crate::error::AppError;
use crate::series::ObservationSeries;

/// Everything needed to render one chart.
pub struct ChartSpec<'a> {
    pub country: &'a CountryConfig,
    pub quantity: Quantity,
    pub mode: DisplayMode,
    pub series: &'a ObservationSeries,
    /// Model projection over the observed range plus the horizon.
    pub projection: &'a [(NaiveDate, f64)],
    /// Raster size in pixels.
    pub width: u32,
    pub height: u32,
}

/// Output file name for a (quantity, country) pair.
///
/// Spaces in country names become underscores so the path stays shell-friendly.
pub fn chart_file_name(quantity: Quantity, country: &str) -> String {
    format!("total_{}_{}.png", quantity.label(), country.replace(' ', "_"))
}

/// Render the chart to `plots_dir`, creating the directory on demand.
///
/// Returns the written path. The caller must have fitted the series already,
/// which guarantees all counts are positive (required by the log axes).
pub fn render_chart(spec: &ChartSpec<'_>, plots_dir: &Path) -> Result<PathBuf, AppError> {
    if spec.series.is_empty() || spec.projection.is_empty() {
        return Err(AppError::new(3, "Nothing to plot: empty series."));
    }

    fs::create_dir_all(plots_dir).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to create plot dir '{}': {e}", plots_dir.display()),
        )
    })?;

    let path = plots_dir.join(chart_file_name(spec.quantity, &spec.country.name));
    draw(spec, &path).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to render chart '{}': {e}", path.display()),
        )
    })?;

    Ok(path)
}

fn draw(spec: &ChartSpec<'_>, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let scale = spec.mode.scale(spec.country.population);

    let observed: Vec<(NaiveDate, f64)> = spec
        .series
        .points()
        .iter()
        .map(|&(date, count)| (date, count as f64 * scale))
        .collect();
    let model: Vec<(NaiveDate, f64)> = spec
        .projection
        .iter()
        .map(|&(date, value)| (date, value * scale))
        .collect();

    let (x_range, y_range) = bounds(&observed, &model).ok_or("no positive values to plot")?;
    // The right axis shows the same positions in raw counts, so it is the
    // primary range divided back by the normalization scale.
    let raw_range = (y_range.start / scale)..(y_range.end / scale);

    let root = BitMapBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.country.name, ("sans-serif", 28))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .set_label_area_size(LabelAreaPosition::Right, 70)
        .build_cartesian_2d(x_range.clone(), y_range.log_scale())?
        .set_secondary_coord(x_range, raw_range.log_scale());

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Date")
        .y_desc(spec.mode.axis_label(spec.quantity))
        .x_labels(8)
        .y_labels(6)
        .x_label_formatter(&|d| d.format("%m-%d").to_string())
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc(format!("total {}", spec.quantity.label()))
        .draw()?;

    chart
        .draw_series(LineSeries::new(model.iter().copied(), &BLUE))?
        .label("Model")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(
            observed
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, RED.filled())),
        )?
        .label("Observed")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Shared x range and padded, strictly positive y range for both series.
fn bounds(
    observed: &[(NaiveDate, f64)],
    model: &[(NaiveDate, f64)],
) -> Option<(std::ops::Range<NaiveDate>, std::ops::Range<f64>)> {
    let x_start = observed.first().map(|&(d, _)| d)?;
    // The model extends past the last observation, so it defines the x end.
    let x_end = model.last().map(|&(d, _)| d)?;

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(_, y) in observed.iter().chain(model) {
        if y.is_finite() && y > 0.0 {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    // Pad the log axis so markers don't sit on the frame.
    Some((x_start..x_end, (y_min * 0.8)..(y_max * 1.25)))
}
