//! Model module containing data structures

mod domain;
mod external_table;
mod fit_quality;
mod parameters;
mod summary_row;
mod time_series;

pub use domain::Domain;
pub use external_table::ExternalTable;
pub use fit_quality::{mse, r_squared, rmse, FitQuality};
pub use parameters::{ForecastParameters, MAX_HORIZON};
pub use summary_row::SummaryRow;
pub use time_series::{ForecastResult, Point, TimeSeries};
