//! Data types used by the yearly aggregation pipeline.

use serde::{Deserialize, Serialize};

/// All events of a single calendar year.
///
/// `count` includes events whose magnitude is null; `magnitudes` does not.
#[derive(Debug, Clone, Default)]
pub struct YearBucket {
    pub count: usize,
    pub magnitudes: Vec<f64>,
}

impl YearBucket {
    pub fn push(&mut self, magnitude: Option<f64>) {
        self.count += 1;
        if let Some(mag) = magnitude {
            self.magnitudes.push(mag);
        }
    }
}

/// One row of the per-year summary table.
///
/// The magnitude aggregates are `None` for years with no measured
/// magnitudes, including gap years with no events at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub count: usize,
    pub mean_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
    pub stddev_magnitude: Option<f64>,
}
