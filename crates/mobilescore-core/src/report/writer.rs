use crate::Result;
use crate::record::MetricRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV column names, in the field order of [`MetricRecord`].
pub const REPORT_HEADERS: [&str; 10] = [
    "URL",
    "Performance Score",
    "Score Explanation",
    "First Contentful Paint",
    "Speed Index",
    "Time to Interactive",
    "Total Blocking Time",
    "Largest Contentful Paint",
    "Cumulative Layout Shift",
    "Server Response Time",
];

pub struct ReportWriter;

impl ReportWriter {
    /// Write records to a CSV file, header first, one row per record.
    pub fn to_file(records: &[MetricRecord], path: &Path) -> Result<()> {
        tracing::debug!("Writing metrics report to: {}", path.display());

        let file = File::create(path)?;
        Self::to_writer(records, BufWriter::new(file))?;

        tracing::info!(
            "Successfully wrote {} records to {}",
            records.len(),
            path.display()
        );

        Ok(())
    }

    /// Render the report as a CSV string
    pub fn to_string(records: &[MetricRecord]) -> Result<String> {
        let mut buffer = Vec::new();
        Self::to_writer(records, &mut buffer)?;

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn to_writer<W: Write>(records: &[MetricRecord], writer: W) -> Result<()> {
        // Header is written by hand so an empty report still has one
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv.write_record(REPORT_HEADERS)?;
        for record in records {
            csv.serialize(record)?;
        }
        csv.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::record::Metric;
    use tempfile::TempDir;

    fn record(url: &str, score: f64) -> MetricRecord {
        MetricRecord::from_audits(url, score, |metric| {
            Some(format!("{} value", metric.label()))
        })
        .unwrap()
    }

    #[test]
    fn test_header_then_rows_in_order() {
        let records = vec![record("A", 95.0), record("B", 40.0)];

        let csv = ReportWriter::to_string(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], REPORT_HEADERS.join(","));
        assert!(lines[1].starts_with("A,95.0,Good: "));
        assert!(lines[2].starts_with("B,40.0,Poor: "));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut with_comma = record("A", 60.0);
        with_comma.total_blocking_time = "1,230 ms".to_string();

        let csv = ReportWriter::to_string(&[with_comma]).unwrap();

        assert!(csv.contains("\"1,230 ms\""));
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let csv = ReportWriter::to_string(&[]).unwrap();

        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("URL,Performance Score,"));
    }

    #[test]
    fn test_to_file_round_trips_through_csv_reader() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.csv");

        ReportWriter::to_file(&[record("https://example.com/", 88.0)], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<MetricRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "https://example.com/");
        assert_eq!(
            rows[0].display_value(Metric::SpeedIndex),
            Some("Speed Index value")
        );
    }

    #[test]
    fn test_unwritable_destination_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing-dir").join("report.csv");

        let result = ReportWriter::to_file(&[record("A", 90.0)], &path);

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
