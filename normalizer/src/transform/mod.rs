//! Transformation module.
//!
//! - Expander: one row per work type
//! - Sort: `(Case Number, Work Types)` ordering
//! - Pipeline: read, expand, sort, write, summarize

pub mod expander;
pub mod pipeline;
pub mod sort;

pub use expander::{expand, expand_all, split_multi};
pub use pipeline::*;
pub use sort::{is_sorted, sort_records, CaseNumberOrder};
