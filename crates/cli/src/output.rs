//! Terminal tables and JSON reports.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use twin_facade::{DomainForecast, ForecastResult, SmootherKind, SummaryRow};

/// JSON document written by `--output`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub scenario: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub smoother: SmootherKind,
    pub forecasts: &'a [DomainForecast],
    pub summary: Vec<SummaryRow>,
}

/// Print one observed/predicted table with its fit metrics.
pub fn print_result(title: &str, result: &ForecastResult) {
    println!("\n=== {} ===", title);
    println!("{:>4}  {:>12}  {:>12}", "t", "observed", "predicted");
    for (obs, pred) in result.observed.iter().zip(result.predicted.iter()) {
        println!("{:>4}  {:>12.3}  {:>12.3}", obs.t, obs.value, pred.value);
    }
    let fit = result.fit_quality();
    println!("RMSE: {:.4}  R²: {:.4}", fit.rmse, fit.r_squared);
}

pub fn print_forecasts(forecasts: &[DomainForecast]) {
    for forecast in forecasts {
        let domain = forecast.domain;
        print_result(
            &format!("{} ({}, {})", domain.title(), domain.intervention(), forecast.time_unit),
            &forecast.result,
        );
        if let Some(level) = domain.reference_level() {
            match forecast.result.predicted.iter().find(|p| p.value <= level) {
                Some(p) => println!("Reaches the {} µg/m³ WHO limit at t = {}", level, p.t),
                None => println!("Stays above the {} µg/m³ WHO limit", level),
            }
        }
    }
}

pub fn print_summary(rows: &[SummaryRow]) {
    println!("\n=== Summary ===");
    println!("{:<26}  {:<20}  {}", "Metric", "Predicted Impact", "Modeled By");
    for row in rows {
        println!(
            "{:<26}  {:<20}  {}",
            row.metric, row.predicted_impact, row.modeled_by
        );
    }
}

/// Write any serializable value as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    println!("\nResults written to {}", path.display());
    Ok(())
}
