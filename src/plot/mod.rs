//! PNG chart rendering.

mod chart;

pub use chart::{chart_file_name, render_chart, ChartSpec};
