//! CSV export
//!
//! The impact summary always has exactly three rows, one per domain in
//! [`Domain::all`] order, with headers `Metric,Predicted Impact,Modeled By`.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use twin_spi::{Domain, ForecastResult, Result, SummaryRow, TwinError};

/// Default file name of the impact summary.
pub const SUMMARY_FILE_NAME: &str = "model_summary_results.csv";

/// File name of a per-domain series export.
pub fn series_file_name(domain: Domain) -> String {
    format!("{}_model_output.csv", domain.file_stem())
}

/// The published impact estimates.
pub fn default_summary() -> Vec<SummaryRow> {
    let impacts = ["~50% in 12 months", "~60% in 10 years", "~70% in 15 years"];
    Domain::all()
        .iter()
        .zip(impacts)
        .map(|(domain, impact)| SummaryRow::new(domain.metric(), impact, domain.modeled_by()))
        .collect()
}

fn csv_error(e: csv::Error) -> TwinError {
    TwinError::Io(e.to_string())
}

/// Write the three summary rows.
///
/// Fails with `InvalidData` unless `rows` holds exactly one row per domain in
/// domain order.
pub fn write_summary<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<()> {
    let domains = Domain::all();
    if rows.len() != domains.len() {
        return Err(TwinError::InvalidData(format!(
            "summary needs exactly {} rows, got {}",
            domains.len(),
            rows.len()
        )));
    }
    for (row, domain) in rows.iter().zip(domains) {
        if row.metric != domain.metric() {
            return Err(TwinError::InvalidData(format!(
                "expected metric '{}' at row {}, found '{}'",
                domain.metric(),
                domain.index() + 1,
                row.metric
            )));
        }
    }

    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row).map_err(csv_error)?;
    }
    csv.flush()?;
    debug!(rows = rows.len(), "wrote summary");
    Ok(())
}

#[derive(Serialize)]
struct SeriesRecord {
    t: usize,
    observed: f64,
    predicted: f64,
}

/// Write one forecast as `t,observed,predicted` rows.
pub fn write_series<W: Write>(writer: W, result: &ForecastResult) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (obs, pred) in result.observed.iter().zip(result.predicted.iter()) {
        csv.serialize(SeriesRecord {
            t: obs.t,
            observed: obs.value,
            predicted: pred.value,
        })
        .map_err(csv_error)?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use twin_spi::TimeSeries;

    fn written(rows: &[SummaryRow]) -> Result<String> {
        let mut buf = Vec::new();
        write_summary(&mut buf, rows)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_default_summary_csv() {
        let text = written(&default_summary()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Metric,Predicted Impact,Modeled By");
        assert_eq!(lines[1], "PM2.5 Reduction,~50% in 12 months,Biofilter Enzyme Model");
        assert_eq!(
            lines[2],
            "Microplastic Degradation,~60% in 10 years,Microbial Decay Simulation"
        );
        assert_eq!(
            lines[3],
            "Malaria Incidence Drop,~70% in 15 years,Gene Drive Decline Model"
        );
    }

    #[test]
    fn test_wrong_row_count_rejected() {
        let mut rows = default_summary();
        rows.pop();
        assert!(matches!(written(&rows), Err(TwinError::InvalidData(_))));

        let mut rows = default_summary();
        rows.push(rows[0].clone());
        assert!(matches!(written(&rows), Err(TwinError::InvalidData(_))));
    }

    #[test]
    fn test_wrong_order_rejected() {
        let mut rows = default_summary();
        rows.swap(0, 2);
        assert!(matches!(written(&rows), Err(TwinError::InvalidData(_))));
    }

    #[test]
    fn test_write_series() {
        let result = ForecastResult::new(
            TimeSeries::from_values(vec![10.0, 8.5]),
            TimeSeries::from_values(vec![9.75, 8.25]),
        )
        .unwrap();
        let mut buf = Vec::new();
        write_series(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "t,observed,predicted\n0,10.0,9.75\n1,8.5,8.25\n");
    }

    #[test]
    fn test_series_file_name() {
        assert_eq!(series_file_name(Domain::AirQuality), "pm25_model_output.csv");
        assert_eq!(series_file_name(Domain::Malaria), "malaria_model_output.csv");
    }
}
