//! Data-quality analysis.
//!
//! Aggregations over one session's bills, grouped by chamber.

pub mod aggregator;

pub use aggregator::*;
