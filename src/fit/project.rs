//! Forward projection of a fitted model over the observed range plus an
//! extrapolation horizon.

use chrono::{Days, NaiveDate};

use crate::fit::ExpFit;
use crate::series::ObservationSeries;

/// Evaluate the model at every observed day plus `future_days` beyond it.
///
/// Output length is `series.len() + future_days`: entry `n-1` carries the
/// last observed date, and later entries advance one calendar day at a time.
/// An empty series projects to nothing.
pub fn project(fit: &ExpFit, series: &ObservationSeries, future_days: u32) -> Vec<(NaiveDate, f64)> {
    let Some(first) = series.first_date() else {
        return Vec::new();
    };

    let total = series.len() + future_days as usize;
    (0..total)
        .map(|offset| {
            let date = first + Days::new(offset as u64);
            (date, fit.predict(offset as i64))
        })
        .collect()
}
