//! Reusable widgets for the dashboard.

mod chart;

pub use chart::ForecastChart;
