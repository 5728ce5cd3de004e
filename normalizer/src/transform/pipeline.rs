//! High-level pipeline: read, expand, sort, write, summarize.
//!
//! # Example
//!
//! ```rust,ignore
//! use relief_normalize::{normalize_file, NormalizeOptions};
//! use std::path::Path;
//!
//! let result = normalize_file(
//!     Path::new("input_data.csv"),
//!     Path::new("normalized.csv"),
//!     &NormalizeOptions::default(),
//! )?;
//! println!("{}", result.summary);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::expander::{expand_all, split_multi};
use super::sort::sort_records;
use crate::error::NormalizeResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{CaseRecord, CaseSchema, CaseTable};
use crate::parser::parse_csv_file;
use crate::report::Summary;
use crate::writer::write_csv_file;

/// Options for a normalization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Field delimiter for both input and output
    pub delimiter: u8,

    /// Force an input encoding instead of detecting it
    pub encoding: Option<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: None,
        }
    }
}

/// Rows after expansion and sorting, before anything is written.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub schema: CaseSchema,
    /// Number of input rows
    pub original_rows: usize,
    /// Input rows that produced no output (no work types)
    pub dropped_rows: usize,
    /// One row per work type, sorted
    pub records: Vec<CaseRecord>,
}

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Result of [`normalize_file`]
#[derive(Debug, Clone)]
pub struct NormalizeOutput {
    /// Normalized rows, in written order
    pub records: Vec<CaseRecord>,
    /// Input rows dropped for having no work types
    pub dropped_rows: usize,
    /// Where the rows were written
    pub output_path: PathBuf,
    pub csv_info: CsvInfo,
    pub summary: Summary,
}

/// Expand every row of a table and sort the result.
pub fn normalize_table(table: CaseTable) -> Normalized {
    let CaseTable { schema, records: input } = table;

    let dropped_rows = input
        .iter()
        .filter(|r| split_multi(r.work_types.as_deref()).is_empty())
        .count();

    let mut records = expand_all(&input);
    sort_records(&mut records);

    Normalized {
        schema,
        original_rows: input.len(),
        dropped_rows,
        records,
    }
}

/// Normalize `input` into `output`.
///
/// This is the main entry point. It:
/// 1. Parses the CSV (encoding detection, required columns)
/// 2. Expands each row into one row per work type
/// 3. Sorts by case number and work type
/// 4. Writes the output CSV
/// 5. Computes the summary counts
pub fn normalize_file(
    input: &Path,
    output: &Path,
    options: &NormalizeOptions,
) -> NormalizeResult<NormalizeOutput> {
    log_info(format!("📖 Reading {}", input.display()));
    let parsed = parse_csv_file(input, options.delimiter, options.encoding.as_deref())?;
    log_success(format!("Encoding: {}", parsed.encoding));
    log_success(format!("Read {} rows", parsed.table.records.len()));

    let csv_info = CsvInfo {
        encoding: parsed.encoding.clone(),
        delimiter: parsed.delimiter as char,
        headers: parsed.table.schema.headers().to_vec(),
        row_count: parsed.table.records.len(),
    };

    log_info(format!("📋 {} columns:", csv_info.headers.len()));
    for (i, col) in csv_info.headers.iter().enumerate() {
        log_info_indent(format!("[{:2}] {}", i + 1, col), 1);
    }

    log_info("⚙️  Expanding work types...");
    let normalized = normalize_table(parsed.table);
    if normalized.dropped_rows > 0 {
        log_warning(format!(
            "{} rows had no work types and were dropped",
            normalized.dropped_rows
        ));
    }
    log_success(format!("{} normalized rows", normalized.records.len()));

    let written = write_csv_file(output, &normalized.schema, &normalized.records, options.delimiter)?;
    log_success(format!("💾 Wrote {} rows to {}", written, output.display()));

    let summary = Summary::from_records(normalized.original_rows, &normalized.records);

    Ok(NormalizeOutput {
        records: normalized.records,
        dropped_rows: normalized.dropped_rows,
        output_path: output.to_path_buf(),
        csv_info,
        summary,
    })
}
