//! Per-year aggregation of an event catalog.
//!
//! This module buckets events by UTC calendar year and produces one summary
//! row per year (count, mean/max magnitude, stddev), filling gap years so
//! the resulting table covers a contiguous span.

pub mod aggregate;
pub mod types;
pub mod utility;
