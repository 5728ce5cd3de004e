//! Deterministic ordering of normalized rows.
//!
//! Rows are ordered by `(Case Number, Work Types)`. Case numbers compare as
//! numbers when every present value in the collection is numeric, and as text
//! otherwise. Absent values go last. The sort is stable, so ties keep input
//! order.

use std::cmp::Ordering;

use crate::models::CaseRecord;

/// How case numbers are compared for a given collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseNumberOrder {
    Numeric,
    Lexical,
}

impl CaseNumberOrder {
    /// Numeric if every present case number parses as a number.
    pub fn detect(records: &[CaseRecord]) -> Self {
        let all_numeric = records
            .iter()
            .filter_map(|r| r.case_number.as_deref())
            .all(|v| parse_number(v).is_some());

        if all_numeric {
            Self::Numeric
        } else {
            Self::Lexical
        }
    }

    fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Numeric => match (parse_number(a), parse_number(b)) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.cmp(b),
            },
            Self::Lexical => a.cmp(b),
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Present values first, absent values last.
fn absent_last<'a>(
    a: Option<&'a str>,
    b: Option<&'a str>,
    cmp: impl FnOnce(&'a str, &'a str) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort rows in place by `(Case Number, Work Types)`.
pub fn sort_records(records: &mut [CaseRecord]) {
    let order = CaseNumberOrder::detect(records);

    records.sort_by(|a, b| {
        absent_last(a.case_number.as_deref(), b.case_number.as_deref(), |x, y| {
            order.compare(x, y)
        })
        .then_with(|| absent_last(a.work_types.as_deref(), b.work_types.as_deref(), str::cmp))
    });
}

/// Whether rows are already in `(Case Number, Work Types)` order.
pub fn is_sorted(records: &[CaseRecord]) -> bool {
    let order = CaseNumberOrder::detect(records);

    records.windows(2).all(|pair| {
        let cmp = absent_last(
            pair[0].case_number.as_deref(),
            pair[1].case_number.as_deref(),
            |x, y| order.compare(x, y),
        )
        .then_with(|| {
            absent_last(pair[0].work_types.as_deref(), pair[1].work_types.as_deref(), str::cmp)
        });
        cmp != Ordering::Greater
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(case: Option<&str>, work: &str, tag: &str) -> CaseRecord {
        let mut r = CaseRecord {
            case_number: case.map(String::from),
            work_types: Some(work.to_string()),
            ..Default::default()
        };
        r.extra.insert("Tag".into(), Some(tag.into()));
        r
    }

    fn keys(records: &[CaseRecord]) -> Vec<(Option<&str>, &str)> {
        records
            .iter()
            .map(|r| (r.case_number.as_deref(), r.work_types.as_deref().unwrap_or("")))
            .collect()
    }

    #[test]
    fn test_numeric_case_numbers() {
        let mut rows = vec![
            row(Some("10"), "Trees", "a"),
            row(Some("9"), "Roof", "b"),
            row(Some("100"), "Debris", "c"),
            row(Some("9"), "Muck Out", "d"),
        ];
        assert_eq!(CaseNumberOrder::detect(&rows), CaseNumberOrder::Numeric);

        sort_records(&mut rows);

        assert_eq!(
            keys(&rows),
            vec![
                (Some("9"), "Muck Out"),
                (Some("9"), "Roof"),
                (Some("10"), "Trees"),
                (Some("100"), "Debris"),
            ]
        );
        assert!(is_sorted(&rows));
    }

    #[test]
    fn test_mixed_case_numbers_sort_lexically() {
        let mut rows = vec![
            row(Some("10"), "Trees", "a"),
            row(Some("9"), "Roof", "b"),
            row(Some("W-2"), "Debris", "c"),
        ];
        assert_eq!(CaseNumberOrder::detect(&rows), CaseNumberOrder::Lexical);

        sort_records(&mut rows);

        assert_eq!(
            keys(&rows),
            vec![(Some("10"), "Trees"), (Some("9"), "Roof"), (Some("W-2"), "Debris")]
        );
    }

    #[test]
    fn test_absent_case_numbers_last() {
        let mut rows = vec![
            row(None, "Trees", "a"),
            row(Some("2"), "Roof", "b"),
            row(Some("1"), "Debris", "c"),
        ];

        sort_records(&mut rows);

        assert_eq!(
            keys(&rows),
            vec![(Some("1"), "Debris"), (Some("2"), "Roof"), (None, "Trees")]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut rows = vec![
            row(Some("5"), "Trees", "first"),
            row(Some("3"), "Roof", "x"),
            row(Some("5"), "Trees", "second"),
            row(Some("5"), "Trees", "third"),
        ];

        sort_records(&mut rows);

        let tags: Vec<_> = rows
            .iter()
            .filter(|r| r.case_number.as_deref() == Some("5"))
            .map(|r| r.get("Tag").unwrap())
            .collect();
        assert_eq!(tags, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_is_sorted_detects_disorder() {
        let rows = vec![row(Some("2"), "A", "a"), row(Some("1"), "B", "b")];
        assert!(!is_sorted(&rows));
        assert!(is_sorted(&[]));
    }
}
