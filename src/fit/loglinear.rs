//! Log-linear fit of an exponential growth model.
//!
//! Given cumulative counts `c_0..c_{n-1}` on consecutive days, we fit
//!
//! ```text
//! ln(c_i) = slope * i + intercept
//! ```
//!
//! by ordinary least squares, which is the exponential model
//! `c(d) = exp(slope * d + intercept)` in the original scale. The regression
//! is solved on a two-column design matrix (intercept + day index) via the
//! shared SVD solver.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::math::solve_least_squares;
use crate::series::ObservationSeries;

/// Fitted exponential model parameters. Immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpFit {
    /// Daily growth of `ln(count)`.
    pub slope: f64,
    /// `ln(count)` at day index 0.
    pub intercept: f64,
}

impl ExpFit {
    /// Modeled count at the given day offset from the series' first date.
    pub fn predict(&self, day_offset: i64) -> f64 {
        (self.slope * day_offset as f64 + self.intercept).exp()
    }

    /// Daily growth rate of the modeled counts (e.g. `0.2` = +20%/day).
    pub fn daily_growth_rate(&self) -> f64 {
        self.slope.exp() - 1.0
    }

    /// Days for the modeled count to double; `None` when not growing.
    pub fn doubling_time_days(&self) -> Option<f64> {
        if self.slope > 0.0 {
            Some(std::f64::consts::LN_2 / self.slope)
        } else {
            None
        }
    }
}

/// Typed fitting failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Fewer than two observations; the slope is undefined.
    TooFewObservations { n: usize },
    /// A zero count makes the logarithm undefined. Callers must detect
    /// all-zero series up front and skip them instead of fitting.
    NonPositiveObservation { date: chrono::NaiveDate },
    /// The least-squares solve failed (ill-conditioned system).
    Singular,
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::TooFewObservations { n } => {
                write!(f, "Need at least 2 observations to fit, got {n}.")
            }
            FitError::NonPositiveObservation { date } => {
                write!(f, "Count on {date} is zero; log-linear fit is undefined.")
            }
            FitError::Singular => write!(f, "Least-squares system is too ill-conditioned to solve."),
        }
    }
}

impl std::error::Error for FitError {}

/// Fit the exponential model to a series by least squares in log space.
pub fn fit_log_linear(series: &ObservationSeries) -> Result<ExpFit, FitError> {
    let n = series.len();
    if n < 2 {
        return Err(FitError::TooFewObservations { n });
    }

    let mut y = Vec::with_capacity(n);
    for &(date, count) in series.points() {
        if count == 0 {
            return Err(FitError::NonPositiveObservation { date });
        }
        y.push((count as f64).ln());
    }

    // Design matrix rows are [1, i]: intercept column plus the zero-based day
    // index, which the series' gap-free invariant ties to calendar days.
    let x = DMatrix::from_fn(n, 2, |row, col| if col == 0 { 1.0 } else { row as f64 });
    let y = DVector::from_vec(y);

    let beta = solve_least_squares(&x, &y).ok_or(FitError::Singular)?;
    Ok(ExpFit {
        intercept: beta[0],
        slope: beta[1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn series_from_counts(counts: &[u64]) -> ObservationSeries {
        let first = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let points = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (first + Days::new(i as u64), c))
            .collect();
        ObservationSeries::from_points(points).unwrap()
    }

    #[test]
    fn recovers_synthetic_exponential() {
        // counts = exp(2i + 1), i = 0..9
        let counts: Vec<u64> = (0..10)
            .map(|i| (2.0 * i as f64 + 1.0).exp().round() as u64)
            .collect();
        let fit = fit_log_linear(&series_from_counts(&counts)).unwrap();

        // Rounding to integer counts perturbs the small early values, so the
        // recovered parameters are close but not exact.
        assert!((fit.slope - 2.0).abs() < 0.05, "slope = {}", fit.slope);
        assert!(
            (fit.intercept - 1.0).abs() < 0.05,
            "intercept = {}",
            fit.intercept
        );
    }

    #[test]
    fn recovers_exact_doubling_series() {
        // counts = 100 * 2^i are exactly representable, so the fit is exact:
        // slope = ln 2, intercept = ln 100.
        let counts: Vec<u64> = (0..10).map(|i| 100u64 << i).collect();
        let fit = fit_log_linear(&series_from_counts(&counts)).unwrap();

        assert!((fit.slope - std::f64::consts::LN_2).abs() < 1e-9);
        assert!((fit.intercept - 100.0f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn predict_matches_model() {
        let fit = ExpFit {
            slope: 0.5,
            intercept: 2.0,
        };
        assert!((fit.predict(0) - 2.0f64.exp()).abs() < 1e-12);
        assert!((fit.predict(4) - 4.0f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn zero_count_is_a_domain_error() {
        let err = fit_log_linear(&series_from_counts(&[0, 0, 0])).unwrap_err();
        assert!(matches!(err, FitError::NonPositiveObservation { .. }));

        // A single embedded zero fails the same way; no silent -inf.
        let err = fit_log_linear(&series_from_counts(&[10, 0, 30])).unwrap_err();
        let date = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();
        assert_eq!(err, FitError::NonPositiveObservation { date });
    }

    #[test]
    fn too_few_observations() {
        let err = fit_log_linear(&series_from_counts(&[5])).unwrap_err();
        assert_eq!(err, FitError::TooFewObservations { n: 1 });
    }

    #[test]
    fn growth_rate_and_doubling_time() {
        let fit = ExpFit {
            slope: std::f64::consts::LN_2,
            intercept: 0.0,
        };
        assert!((fit.daily_growth_rate() - 1.0).abs() < 1e-12);
        assert!((fit.doubling_time_days().unwrap() - 1.0).abs() < 1e-12);

        let flat = ExpFit {
            slope: -0.1,
            intercept: 0.0,
        };
        assert_eq!(flat.doubling_time_days(), None);
    }
}
