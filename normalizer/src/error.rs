//! Error types for the normalization pipeline.
//!
//! - [`CsvError`] - reading and decoding the input file
//! - [`SchemaError`] - required columns missing from the header
//! - [`WriteError`] - writing the normalized output
//! - [`NormalizeError`] - top-level error returned by the pipeline
//!
//! Every lower-level error converts into [`NormalizeError`] through `From`,
//! so `?` works across module boundaries.

use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading the input CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown encoding requested.
    #[error("Unsupported encoding: {0}")]
    Encoding(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    Parse(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors raised when the header row does not carry the expected columns.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required column is absent.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing the normalized CSV.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Output file could not be created or flushed.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("Failed to encode CSV row: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::transform::pipeline::normalize_file`].
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Input could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Input header is missing a required column.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Output could not be written.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV reading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for schema checks.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for output writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for the whole pipeline.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let err: NormalizeError = csv_err.into();
        assert!(err.to_string().contains("empty"));

        let schema_err = SchemaError::MissingColumn("Claimed By".into());
        let err: NormalizeError = schema_err.into();
        assert!(err.to_string().contains("Claimed By"));
    }

    #[test]
    fn test_write_error_mentions_path() {
        let err = WriteError::Io {
            path: "out/normalized.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/normalized.csv"));
        assert!(msg.contains("denied"));
    }
}
