//! Log-linear exponential fitting and forward projection.

mod loglinear;
mod project;

pub use loglinear::{fit_log_linear, ExpFit, FitError};
pub use project::project;
