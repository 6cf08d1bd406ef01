//! Small numerical helpers shared by the fitting code.

mod ols;

pub use ols::solve_least_squares;
