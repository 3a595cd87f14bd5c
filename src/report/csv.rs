//! # CSV Emitter
//!
//! Renders report rows as CSV. Fields are comma-joined with no quoting or
//! escaping, a known limitation of the report format.
use std::io::Write;

use super::aggregate::ReportRow;

/// Fixed CSV header
pub const CSV_HEADER: &str = "Cluster,Repository,Image Tags,Critical,High,Medium,Low,Info,Active Count,ImageId,Image Created Time,Image Size,Number Fixes";

/// Timestamp format for the Image Created Time column
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Write the header line and one line per row
pub fn write_report<W: Write>(mut writer: W, rows: &[ReportRow]) -> std::io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for row in rows {
        writeln!(writer, "{}", render_row(row))?;
    }
    Ok(())
}

/// Render one row in the fixed column order
fn render_row(row: &ReportRow) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{}",
        row.cluster,
        row.repo,
        row.tag,
        row.counts.critical,
        row.counts.high,
        row.counts.medium,
        row.counts.low,
        row.counts.info,
        row.active_count,
        row.image_id,
        row.created_time.format(TIME_FORMAT),
        row.size,
        row.counts.total()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregate::SeverityCounts;

    fn row() -> ReportRow {
        ReportRow {
            cluster: "prod".to_string(),
            repo: "index.docker.io/library/app".to_string(),
            tag: "v1".to_string(),
            image_id: "sha256:aaaa".to_string(),
            created_time: "2026-08-01T00:00:00Z".parse().unwrap(),
            size: 104_857_600,
            counts: SeverityCounts {
                critical: 2,
                high: 1,
                medium: 0,
                low: 3,
                info: 0,
            },
            active_count: 4,
        }
    }

    #[test]
    fn test_row_rendering() {
        assert_eq!(
            render_row(&row()),
            "prod,index.docker.io/library/app,v1,2,1,0,3,0,4,sha256:aaaa,2026-08-01T00:00:00Z,104857600,6"
        );
    }

    #[test]
    fn test_report_starts_with_header() {
        let mut output = Vec::new();
        write_report(&mut output, &[row()]).unwrap();

        let report = String::from_utf8(output).unwrap();
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert!(lines.next().unwrap().starts_with("prod,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_report_is_header_only() {
        let mut output = Vec::new();
        write_report(&mut output, &[]).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), format!("{}\n", CSV_HEADER));
    }
}
