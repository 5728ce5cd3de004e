//! CSV output for normalized case rows.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{WriteError, WriteResult};
use crate::models::{CaseRecord, CaseSchema};

/// Default input file name for batch runs.
pub const DEFAULT_INPUT_FILE: &str = "input_data.csv";

/// Prefix of generated output file names.
const OUTPUT_PREFIX: &str = "output_data_";

/// Write rows as CSV to any writer, header first.
///
/// Returns the number of data rows written.
pub fn write_records<W: Write>(
    writer: W,
    schema: &CaseSchema,
    records: &[CaseRecord],
    delimiter: u8,
) -> WriteResult<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record(schema.headers())?;
    for record in records {
        csv_writer.write_record(record.to_cells(schema))?;
    }
    csv_writer.flush().map_err(|e| WriteError::Csv(e.into()))?;

    Ok(records.len())
}

/// Write rows to a CSV file, replacing it if it exists.
pub fn write_csv_file(
    path: &Path,
    schema: &CaseSchema,
    records: &[CaseRecord],
    delimiter: u8,
) -> WriteResult<usize> {
    let file = std::fs::File::create(path).map_err(|source| WriteError::Io {
        path: path.display().to_string(),
        source,
    })?;

    write_records(std::io::BufWriter::new(file), schema, records, delimiter)
}

/// Output file name stamped with `MMDDYYHHMMSS`.
pub fn timestamped_file_name(now: DateTime<Local>) -> String {
    format!("{}{}.csv", OUTPUT_PREFIX, now.format("%m%d%y%H%M%S"))
}

/// Timestamped output path inside `dir`, using the current local time.
pub fn timestamped_output_path(dir: &Path) -> PathBuf {
    dir.join(timestamped_file_name(Local::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn schema() -> CaseSchema {
        CaseSchema::from_headers(
            ["Case Number", "Work Types", "Statuses", "Claimed By", "Address"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_write_records_absent_as_empty() {
        let schema = schema();
        let record = schema.record_from_cells(["7", "Trees", "", "", "1 Elm St, Unit 2"]);

        let mut buf = Vec::new();
        let written = write_records(&mut buf, &schema, &[record], b',').unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            text,
            "Case Number,Work Types,Statuses,Claimed By,Address\n7,Trees,,,\"1 Elm St, Unit 2\"\n"
        );
    }

    #[test]
    fn test_header_written_for_empty_output() {
        let mut buf = Vec::new();
        let written = write_records(&mut buf, &schema(), &[], b',').unwrap();

        assert_eq!(written, 0);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Case Number,Work Types,Statuses,Claimed By,Address\n"
        );
    }

    #[test]
    fn test_timestamped_file_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(timestamped_file_name(now), "output_data_030724090502.csv");
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = write_csv_file(&path, &schema(), &[], b',').unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
    }
}
