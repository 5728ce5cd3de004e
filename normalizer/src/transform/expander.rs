//! Split multi-work-type rows into one row per work type.
//!
//! # Alignment
//!
//! ```text
//! Work Types: Trees | Roof | Muck Out     →  Trees     Open    Team A
//! Statuses:   Open  | Closed              →  Roof      Closed  -
//! Claimed By: Team A                      →  Muck Out  -       -
//! ```
//!
//! `Claimed By` is padded with absent values up to the number of work types;
//! `Statuses` is not padded and is read by index only when in range. Both end
//! up absent past their last token.

use crate::models::{CaseRecord, MULTI_VALUE_SEPARATOR};

/// Split a multi-value cell into its raw tokens.
///
/// An absent cell is an empty sequence, never a single empty token.
pub fn split_multi(field: Option<&str>) -> Vec<&str> {
    match field {
        Some(value) if !value.is_empty() => value.split(MULTI_VALUE_SEPARATOR).collect(),
        _ => Vec::new(),
    }
}

/// Expand one record into one record per work type.
///
/// A record without work types yields nothing.
pub fn expand(record: &CaseRecord) -> Vec<CaseRecord> {
    let work_types = split_multi(record.work_types.as_deref());
    let statuses = split_multi(record.statuses.as_deref());

    let mut claimants: Vec<Option<&str>> = split_multi(record.claimed_by.as_deref())
        .into_iter()
        .map(Some)
        .collect();
    if claimants.len() < work_types.len() {
        claimants.resize(work_types.len(), None);
    }

    work_types
        .iter()
        .enumerate()
        .map(|(i, work_type)| {
            let mut row = record.clone();
            row.work_types = Some(work_type.trim().to_string());
            row.statuses = statuses.get(i).map(|s| s.trim().to_string());
            row.claimed_by = claimants[i]
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
            row
        })
        .collect()
}

/// Expand every record, concatenating the results in input order.
pub fn expand_all(records: &[CaseRecord]) -> Vec<CaseRecord> {
    records.iter().flat_map(expand).collect()
}
