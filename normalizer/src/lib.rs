//! # relief-normalize - one row per work type for disaster relief case exports
//!
//! Case exports bundle several work types per row, with matching statuses and
//! claimants, as `|`-separated cells. This crate splits them into one row per
//! work type and sorts the result.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Expander   │────▶│  CSV File   │
//! │  (any enc)  │     │  (schema)   │     │   + Sort    │     │ (1 per type)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relief_normalize::{normalize_file, NormalizeOptions};
//! use std::path::Path;
//!
//! let result = normalize_file(
//!     Path::new("input_data.csv"),
//!     Path::new("normalized.csv"),
//!     &NormalizeOptions::default(),
//! ).unwrap();
//! println!("{}", result.summary);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Case records and schema
//! - [`parser`] - CSV reading with encoding detection
//! - [`transform`] - Expansion, ordering and pipeline
//! - [`writer`] - CSV output and output file naming
//! - [`report`] - Summary counts
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Input / output
pub mod parser;
pub mod writer;

// Transformation
pub mod transform;

// Reporting
pub mod logs;
pub mod report;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, NormalizeError, SchemaError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    CaseRecord,
    CaseSchema,
    CaseTable,
    CASE_NUMBER,
    CLAIMED_BY,
    REQUIRED_COLUMNS,
    STATUSES,
    WORK_TYPES,
};

// =============================================================================
// Re-exports - CSV Parsing / Writing
// =============================================================================

pub use parser::{
    decode_content,
    detect_encoding,
    parse_bytes,
    parse_csv_file,
    parse_csv_str,
    ParseResult,
};

pub use writer::{
    timestamped_file_name,
    timestamped_output_path,
    write_csv_file,
    write_records,
    DEFAULT_INPUT_FILE,
};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    expand,
    expand_all,
    is_sorted,
    normalize_file,
    normalize_table,
    sort_records,
    split_multi,
    CsvInfo,
    NormalizeOptions,
    NormalizeOutput,
    Normalized,
};

// =============================================================================
// Re-exports - Reporting
// =============================================================================

pub use report::{Summary, ValueCounts};
