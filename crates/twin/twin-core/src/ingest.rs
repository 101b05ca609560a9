//! External data ingestion
//!
//! Parses an uploaded two-column CSV (time, value) and fits it to the
//! forecast horizon.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use twin_spi::{ExternalTable, Result, TimeSeries, TwinError, MAX_HORIZON};

/// Parse a CSV table with a header row.
///
/// Column 0 is the time, column 1 the value. Extra columns are ignored.
/// Rows are numbered from 1, counting data rows only.
pub fn read_table<R: Read>(reader: R) -> Result<ExternalTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut times = Vec::new();
    let mut values = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record =
            result.map_err(|e| TwinError::InvalidData(format!("row {}: {}", row, e)))?;

        if record.len() < 2 {
            return Err(TwinError::InvalidData(format!(
                "row {}: expected at least 2 columns, found {}",
                row,
                record.len()
            )));
        }

        times.push(parse_cell(&record[0], row, "time")?);
        values.push(parse_cell(&record[1], row, "value")?);
    }

    if values.is_empty() {
        return Err(TwinError::InvalidData("table has no data rows".to_string()));
    }

    debug!(rows = values.len(), "parsed external table");
    ExternalTable::new(times, values)
}

/// Read and parse a table from disk.
pub fn read_table_file(path: impl AsRef<Path>) -> Result<ExternalTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| TwinError::Io(format!("{}: {}", path.display(), e)))?;
    read_table(BufReader::new(file))
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<f64> {
    let value: f64 = cell.parse().map_err(|_| {
        TwinError::InvalidData(format!(
            "row {}: {} '{}' is not a number",
            row, column, cell
        ))
    })?;
    if !value.is_finite() {
        return Err(TwinError::InvalidData(format!(
            "row {}: {} must be finite",
            row, column
        )));
    }
    Ok(value)
}

/// Fit a table to exactly `horizon` points.
///
/// Rows are sampled by position, not by their time column: output point `k`
/// is row `k`. Tables at least as long as the horizon are truncated; shorter
/// tables keep every row and hold the last value out to the horizon, so
/// interior peaks and troughs survive.
pub fn resample(table: &ExternalTable, horizon: usize) -> Result<TimeSeries> {
    if horizon == 0 {
        return Err(TwinError::invalid_parameter("horizon", "must be positive"));
    }
    if horizon > MAX_HORIZON {
        return Err(TwinError::invalid_parameter(
            "horizon",
            format!("must be at most {}, got {}", MAX_HORIZON, horizon),
        ));
    }

    let values = table.values();

    if values.len() >= horizon {
        return Ok(TimeSeries::from_values(values[..horizon].to_vec()));
    }

    // table rows are never empty
    let last = values[values.len() - 1];
    let mut resampled = Vec::with_capacity(horizon);
    resampled.extend_from_slice(values);
    resampled.resize(horizon, last);

    debug!(rows = values.len(), horizon, "padded external table to horizon");
    Ok(TimeSeries::from_values(resampled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table(rows: &[(f64, f64)]) -> ExternalTable {
        ExternalTable::new(
            rows.iter().map(|r| r.0).collect(),
            rows.iter().map(|r| r.1).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_read_table() {
        let csv = "year,pm25\n2020,90\n2021, 80.5\n2022,70,extra\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.times(), &[2020.0, 2021.0, 2022.0]);
        assert_eq!(table.values(), &[90.0, 80.5, 70.0]);
    }

    #[test]
    fn test_non_numeric_cell_names_row() {
        let csv = "t,v\n0,1\n1,abc\n";
        match read_table(csv.as_bytes()) {
            Err(TwinError::InvalidData(msg)) => {
                assert!(msg.starts_with("row 2"), "{}", msg);
                assert!(msg.contains("abc"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_single_column_row_rejected() {
        let csv = "t,v\n0,1\n5\n";
        match read_table(csv.as_bytes()) {
            Err(TwinError::InvalidData(msg)) => assert!(msg.starts_with("row 2"), "{}", msg),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            read_table("t,v\n".as_bytes()),
            Err(TwinError::InvalidData(_))
        ));
        assert!(matches!(read_table("".as_bytes()), Err(TwinError::InvalidData(_))));
    }

    #[test]
    fn test_decreasing_time_rejected() {
        let csv = "t,v\n0,1\n2,2\n1,3\n";
        assert!(matches!(
            read_table(csv.as_bytes()),
            Err(TwinError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_table_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "month,pm25").unwrap();
        writeln!(file, "0,120").unwrap();
        writeln!(file, "1,110").unwrap();
        let table = read_table_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        assert!(matches!(
            read_table_file("/nonexistent/upload.csv"),
            Err(TwinError::Io(_))
        ));
    }

    #[test]
    fn test_resample_truncates() {
        let t = table(&[(0.0, 5.0), (1.0, 4.0), (2.0, 3.0), (3.0, 2.0)]);
        let series = resample(&t, 3).unwrap();
        assert_eq!(series.values(), vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_resample_holds_last_row() {
        let t = table(&[(0.0, 100.0), (1.0, 80.0), (2.0, 60.0)]);
        let series = resample(&t, 5).unwrap();
        assert_eq!(series.values(), vec![100.0, 80.0, 60.0, 60.0, 60.0]);
    }

    #[test]
    fn test_resample_keeps_interior_peak() {
        let t = table(&[(0.0, 0.0), (1.0, 100.0), (2.0, 0.0)]);
        let series = resample(&t, 4).unwrap();
        assert_eq!(series.values(), vec![0.0, 100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_resample_ignores_time_spacing() {
        let t = table(&[(0.0, 10.0), (2.0, 8.0), (10.0, 0.0)]);
        assert_eq!(resample(&t, 4).unwrap().values(), vec![10.0, 8.0, 0.0, 0.0]);
    }

    #[test]
    fn test_resample_spans_input_range() {
        let t = table(&[(1990.0, 140.0), (2000.0, 95.0), (2010.0, 60.0), (2020.0, 35.0)]);
        let series = resample(&t, 30).unwrap();
        assert_eq!(series.len(), 30);
        assert_eq!(series.first(), Some(140.0));
        assert_eq!(series.last(), Some(35.0));
        assert!(series.values().windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_resample_single_row_is_constant() {
        let t = table(&[(0.0, 42.0)]);
        assert_eq!(resample(&t, 4).unwrap().values(), vec![42.0; 4]);
    }

    #[test]
    fn test_resample_zero_horizon() {
        let t = table(&[(0.0, 1.0), (1.0, 2.0)]);
        assert!(matches!(
            resample(&t, 0),
            Err(TwinError::InvalidParameter { .. })
        ));
        assert!(matches!(
            resample(&t, MAX_HORIZON + 1),
            Err(TwinError::InvalidParameter { .. })
        ));
    }
}
