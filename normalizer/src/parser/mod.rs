//! CSV reader for case exports, with encoding auto-detection.
//!
//! Produces a [`CaseTable`]: the header row checked for the required columns,
//! and one [`crate::models::CaseRecord`] per non-empty line.

use std::path::Path;

use encoding_rs::Encoding;

use crate::error::{CsvError, CsvResult, NormalizeResult};
use crate::models::{CaseSchema, CaseTable};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows
    pub table: CaseTable,
    /// Detected or forced encoding
    pub encoding: String,
    /// Field delimiter used
    pub delimiter: u8,
}

/// Detect the encoding of raw bytes using chardet.
///
/// Falls back to UTF-8 when the detected charset has no decoder.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    let name = match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    };

    if Encoding::for_label(name.as_bytes()).is_some() {
        name
    } else {
        "utf-8".to_string()
    }
}

/// Decode bytes using the named encoding.
///
/// A leading byte order mark is stripped. Unmappable bytes are replaced.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let label = match encoding.to_lowercase().as_str() {
        "ascii" | "utf8" => "utf-8".to_string(),
        "latin-1" | "latin1" => "iso-8859-1".to_string(),
        other => other.to_string(),
    };
    let enc = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| CsvError::Encoding(encoding.to_string()))?;

    let (decoded, _, _) = enc.decode(bytes);
    Ok(decoded.into_owned())
}

/// Parse CSV text into a case table.
///
/// Empty lines are skipped. Short rows are padded with absent cells, extra
/// cells are ignored.
///
/// # Example
/// ```ignore
/// use relief_normalize::parse_csv_str;
///
/// let csv = "Case Number,Work Types,Statuses,Claimed By\n1,Trees|Roof,Open,Team A";
/// let table = parse_csv_str(csv, b',').unwrap();
///
/// assert_eq!(table.records.len(), 1);
/// assert_eq!(table.records[0].work_types.as_deref(), Some("Trees|Roof"));
/// ```
pub fn parse_csv_str(content: &str, delimiter: u8) -> NormalizeResult<CaseTable> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile.into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(CsvError::from)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let schema = CaseSchema::from_headers(headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(CsvError::from)?;
        records.push(schema.record_from_cells(row.iter()));
    }

    Ok(CaseTable { schema, records })
}

/// Parse a CSV file, detecting the encoding unless one is forced.
pub fn parse_csv_file<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
    encoding: Option<&str>,
) -> NormalizeResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref()).map_err(CsvError::from)?;
    parse_bytes(&bytes, delimiter, encoding)
}

/// Parse CSV bytes, detecting the encoding unless one is forced.
pub fn parse_bytes(bytes: &[u8], delimiter: u8, encoding: Option<&str>) -> NormalizeResult<ParseResult> {
    let encoding = match encoding {
        Some(e) => e.to_string(),
        None => detect_encoding(bytes),
    };
    let content = decode_content(bytes, &encoding)?;
    let table = parse_csv_str(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NormalizeError, SchemaError};

    const HEADER: &str = "Case Number,Work Types,Statuses,Claimed By";

    #[test]
    fn test_simple_csv() {
        let csv = format!("{HEADER}\n1,Trees|Roof,Open|Closed,Team A\n2,Muck Out,,");
        let table = parse_csv_str(&csv, b',').unwrap();

        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].case_number.as_deref(), Some("1"));
        assert_eq!(table.records[0].statuses.as_deref(), Some("Open|Closed"));
        assert_eq!(table.records[1].statuses, None);
        assert_eq!(table.records[1].claimed_by, None);
    }

    #[test]
    fn test_quoted_values_keep_commas() {
        let csv = format!("{HEADER},Address\n3,Trees,Open,Team A,\"12 Main St, Apt 4\"");
        let table = parse_csv_str(&csv, b',').unwrap();

        assert_eq!(table.records[0].get("Address"), Some("12 Main St, Apt 4"));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = format!("{HEADER}\n1,Trees,,\n\n2,Roof,,\n");
        let table = parse_csv_str(&csv, b',').unwrap();

        assert_eq!(table.records.len(), 2);
    }

    #[test]
    fn test_extra_cells_ignored() {
        let csv = format!("{HEADER}\n1,Trees,Open,Team A,surplus,more");
        let table = parse_csv_str(&csv, b',').unwrap();

        assert_eq!(table.records[0].claimed_by.as_deref(), Some("Team A"));
        assert!(table.records[0].extra.is_empty());
    }

    #[test]
    fn test_missing_column_error() {
        let csv = "Case Number,Work Types,Statuses\n1,Trees,Open";
        let err = parse_csv_str(csv, b',').unwrap_err();

        assert!(matches!(
            err,
            NormalizeError::Schema(SchemaError::MissingColumn(ref c)) if c == "Claimed By"
        ));
    }

    #[test]
    fn test_empty_csv_error() {
        let err = parse_csv_str("", b',').unwrap_err();
        assert!(matches!(err, NormalizeError::Csv(CsvError::EmptyFile)));
    }

    #[test]
    fn test_bom_stripped_from_first_header() {
        let csv = "\u{feff}Case Number,Work Types,Statuses,Claimed By\n1,Trees,,";
        let table = parse_csv_str(csv, b',').unwrap();

        assert_eq!(table.schema.headers()[0], "Case Number");
    }

    #[test]
    fn test_padded_header_is_not_required_column() {
        let csv = "Case Number, Work Types ,Statuses,Claimed By\n1,Trees,,";
        let err = parse_csv_str(csv, b',').unwrap_err();

        assert!(matches!(
            err,
            NormalizeError::Schema(SchemaError::MissingColumn(ref c)) if c == "Work Types"
        ));
    }

    #[test]
    fn test_na_markers_read_as_absent() {
        let csv = format!("{HEADER},Note\n1,NA,Open,N/A,nan\n2,Trees,NULL,null,n/a");
        let table = parse_csv_str(&csv, b',').unwrap();

        assert_eq!(table.records[0].work_types, None);
        assert_eq!(table.records[0].claimed_by, None);
        assert_eq!(table.records[0].get("Note"), None);
        assert_eq!(table.records[1].statuses, None);
        assert_eq!(table.records[1].claimed_by, None);
    }

    #[test]
    fn test_duplicate_header_cells_kept() {
        let csv = "Case Number,Note,Work Types,Statuses,Claimed By,Note\n1,first,A,Open,X,second";
        let table = parse_csv_str(csv, b',').unwrap();

        assert_eq!(table.schema.headers()[5], "Note.1");
        assert_eq!(table.records[0].get("Note"), Some("first"));
        assert_eq!(table.records[0].get("Note.1"), Some("second"));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let csv = "Case Number;Work Types;Statuses;Claimed By\n1;Trees|Roof;Open;";
        let table = parse_csv_str(csv, b';').unwrap();

        assert_eq!(table.records[0].work_types.as_deref(), Some("Trees|Roof"));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let err = decode_content(b"abc", "klingon-8").unwrap_err();
        assert!(matches!(err, CsvError::Encoding(_)));
    }

    #[test]
    fn test_parse_bytes_ascii() {
        let csv = format!("{HEADER}\n1,Trees,Open,Team A");
        let result = parse_bytes(csv.as_bytes(), b',', None).unwrap();

        assert_eq!(result.delimiter, b',');
        assert_eq!(result.table.records.len(), 1);
    }
}
