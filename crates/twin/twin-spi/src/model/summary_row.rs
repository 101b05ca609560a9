//! Summary export row

use serde::{Deserialize, Serialize};

use crate::model::domain::Domain;
use crate::model::time_series::ForecastResult;

/// One line of the impact summary CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Predicted Impact")]
    pub predicted_impact: String,
    #[serde(rename = "Modeled By")]
    pub modeled_by: String,
}

impl SummaryRow {
    pub fn new(
        metric: impl Into<String>,
        predicted_impact: impl Into<String>,
        modeled_by: impl Into<String>,
    ) -> Self {
        Self {
            metric: metric.into(),
            predicted_impact: predicted_impact.into(),
            modeled_by: modeled_by.into(),
        }
    }

    /// Describe the predicted reduction of one domain's forecast.
    ///
    /// The impact reads `~{reduction}% in {span} {unit}`, where the
    /// reduction is `(1 − last / first) · 100` of the predicted curve,
    /// rounded to a whole percent. `span` is the time the scenario covers,
    /// which is not always the point count.
    pub fn for_forecast(
        domain: Domain,
        result: &ForecastResult,
        span: usize,
        time_unit: &str,
    ) -> Self {
        let reduction = match (result.predicted.first(), result.predicted.last()) {
            (Some(first), Some(last)) if first.abs() > f64::EPSILON => (1.0 - last / first) * 100.0,
            _ => 0.0,
        };
        Self::new(
            domain.metric(),
            format!("~{}% in {} {}", reduction.round() as i64, span, time_unit),
            domain.modeled_by(),
        )
    }
}
