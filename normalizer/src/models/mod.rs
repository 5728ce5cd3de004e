//! Domain models for case exports.
//!
//! - [`CaseSchema`] - header row, with the four identified columns located
//! - [`CaseRecord`] - one case row: typed slots plus pass-through columns
//! - [`CaseTable`] - schema and rows as read from a file

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

// =============================================================================
// Column Names
// =============================================================================

pub const CASE_NUMBER: &str = "Case Number";
pub const WORK_TYPES: &str = "Work Types";
pub const STATUSES: &str = "Statuses";
pub const CLAIMED_BY: &str = "Claimed By";

/// Columns every input file must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 4] = [CASE_NUMBER, WORK_TYPES, STATUSES, CLAIMED_BY];

/// Separator between values inside a multi-value cell.
pub const MULTI_VALUE_SEPARATOR: char = '|';

/// Cell contents read as a missing value, matched exactly.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell denotes a missing value.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_MARKERS.contains(&cell)
}

// =============================================================================
// Schema
// =============================================================================

/// Column layout of a case export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSchema {
    headers: Vec<String>,
}

impl CaseSchema {
    /// Build a schema from a header row.
    ///
    /// Repeated names get a numeric suffix (`Note`, `Note.1`, ...) so every
    /// column keeps its own cells. Fails on the first required column that is
    /// not present.
    pub fn from_headers(headers: Vec<String>) -> SchemaResult<Self> {
        let headers = dedupe_headers(headers);
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(SchemaError::MissingColumn(required.to_string()));
            }
        }
        Ok(Self { headers })
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Build a record from the cells of one row, aligned with the headers.
    ///
    /// Missing trailing cells and NA markers become absent values.
    pub fn record_from_cells<'a, I>(&self, cells: I) -> CaseRecord
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cells = cells.into_iter();
        let mut record = CaseRecord::default();

        for header in &self.headers {
            let value = cells
                .next()
                .filter(|c| !is_missing(c))
                .map(str::to_string);
            record.set(header, value);
        }

        record
    }
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header.clone();
        if seen.contains(&name) {
            let count = counts.entry(header.clone()).or_insert(0);
            while seen.contains(&name) {
                *count += 1;
                name = format!("{}.{}", header, count);
            }
        }
        seen.insert(name.clone());
        out.push(name);
    }

    out
}

// =============================================================================
// Record
// =============================================================================

/// One row of a case export.
///
/// The four identified columns get typed slots; everything else is kept
/// verbatim in `extra`, keyed by column name in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub case_number: Option<String>,
    pub work_types: Option<String>,
    pub statuses: Option<String>,
    pub claimed_by: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, Option<String>>,
}

impl CaseRecord {
    /// Value of a column by name.
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            CASE_NUMBER => self.case_number.as_deref(),
            WORK_TYPES => self.work_types.as_deref(),
            STATUSES => self.statuses.as_deref(),
            CLAIMED_BY => self.claimed_by.as_deref(),
            other => self.extra.get(other).and_then(|v| v.as_deref()),
        }
    }

    /// Set a column by name.
    pub fn set(&mut self, column: &str, value: Option<String>) {
        match column {
            CASE_NUMBER => self.case_number = value,
            WORK_TYPES => self.work_types = value,
            STATUSES => self.statuses = value,
            CLAIMED_BY => self.claimed_by = value,
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }

    /// Cells in schema order, absent values as empty strings.
    pub fn to_cells<'a>(&'a self, schema: &'a CaseSchema) -> impl Iterator<Item = &'a str> + 'a {
        schema
            .headers()
            .iter()
            .map(move |h| self.get(h).unwrap_or(""))
    }
}

// =============================================================================
// Table
// =============================================================================

/// A parsed case export.
#[derive(Debug, Clone)]
pub struct CaseTable {
    pub schema: CaseSchema,
    pub records: Vec<CaseRecord>,
}
