//! Summary statistics over normalized rows.
//!
//! Row counts plus value-frequency tables for the three expanded columns.
//! Purely observational; nothing here feeds back into the output file.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::CaseRecord;

/// Occurrences of each distinct value, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueCounts(pub Vec<(String, usize)>);

impl ValueCounts {
    /// Count present values. Ties keep first-appearance order.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for value in values.into_iter().flatten() {
            *counts.entry(value).or_default() += 1;
        }

        let mut pairs: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(v, n)| (v.to_string(), n))
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));

        Self(pairs)
    }

    /// Count for one value.
    pub fn get(&self, value: &str) -> Option<usize> {
        self.0.iter().find(|(v, _)| v == value).map(|(_, n)| *n)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValueCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.0.iter().map(|(v, _)| v.chars().count()).max().unwrap_or(0);
        for (value, count) in &self.0 {
            writeln!(f, "  {:<width$}  {}", value, count, width = width)?;
        }
        Ok(())
    }
}

/// Counts reported after a normalization run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub original_rows: usize,
    pub normalized_rows: usize,
    pub work_types: ValueCounts,
    pub statuses: ValueCounts,
    pub claimed_by: ValueCounts,
}

impl Summary {
    pub fn from_records(original_rows: usize, records: &[CaseRecord]) -> Self {
        Self {
            original_rows,
            normalized_rows: records.len(),
            work_types: ValueCounts::from_values(records.iter().map(|r| r.work_types.as_deref())),
            statuses: ValueCounts::from_values(records.iter().map(|r| r.statuses.as_deref())),
            claimed_by: ValueCounts::from_values(records.iter().map(|r| r.claimed_by.as_deref())),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Normalization complete. Summary:")?;
        writeln!(f, "Original rows: {}", self.original_rows)?;
        writeln!(f, "Normalized rows: {}", self.normalized_rows)?;
        writeln!(f)?;
        writeln!(f, "Work Types distribution:")?;
        write!(f, "{}", self.work_types)?;
        writeln!(f)?;
        writeln!(f, "Status distribution:")?;
        write!(f, "{}", self.statuses)?;
        writeln!(f)?;
        writeln!(f, "Claimer distribution:")?;
        write!(f, "{}", self.claimed_by)
    }
}
