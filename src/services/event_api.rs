//! Trait and types for querying an earthquake event service.

use anyhow::Result;
use chrono::NaiveDate;

use quake_stats::parser::Catalog;

/// Query parameters for an FDSN-style event search.
///
/// The defaults reproduce the fixed UK query this tool was built around:
/// a bounding box covering Great Britain and Ireland, events of magnitude
/// 1 and above, between 2000-01-01 and 2018-10-11, oldest first.
#[derive(Debug, Clone)]
pub struct EventQuery {
    pub start_time: NaiveDate,
    pub end_time: NaiveDate,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_magnitude: f64,
    pub order_by: OrderBy,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            start_time: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"),
            end_time: NaiveDate::from_ymd_opt(2018, 10, 11).expect("valid date"),
            min_latitude: 50.008,
            max_latitude: 58.723,
            min_longitude: -9.756,
            max_longitude: 1.67,
            min_magnitude: 1.0,
            order_by: OrderBy::TimeAsc,
        }
    }
}

/// Sort order of the returned events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderBy {
    TimeAsc,
    TimeDesc,
    Magnitude,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::TimeAsc => "time-asc",
            OrderBy::TimeDesc => "time",
            OrderBy::Magnitude => "magnitude",
        }
    }
}

/// Abstraction over an event service provider (e.g., the USGS FDSN API).
#[async_trait::async_trait]
pub trait EventApi {
    /// Runs the query and returns the parsed event catalog.
    async fn query_events(&self, query: &EventQuery) -> Result<Catalog>;
}
