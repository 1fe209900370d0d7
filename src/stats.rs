use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::parser::Catalog;

/// One-pass summary of an event catalog.
///
/// The strongest-event fields are kept flat so a record serializes cleanly
/// to a CSV row.
#[derive(Debug, Default, Serialize)]
pub struct CatalogStats {
    pub timestamp: DateTime<Utc>,
    pub region: Option<String>,
    pub total_events: usize,

    // field coverage
    pub with_magnitude: usize,
    pub missing_magnitude: usize,
    pub with_place: usize,
    pub with_depth: usize,

    // observed year span
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,

    // strongest event
    pub strongest_magnitude: Option<f64>,
    pub strongest_place: Option<String>,
    pub strongest_latitude: Option<f64>,
    pub strongest_longitude: Option<f64>,
    pub strongest_depth_km: Option<f64>,
    pub strongest_time: Option<DateTime<Utc>>,

    // error tracking
    pub error_type: Option<String>,
    pub error_message: Option<String>,
}

impl CatalogStats {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut s = CatalogStats {
            timestamp: Utc::now(),
            ..Default::default()
        };

        s.total_events = catalog.features.len();

        let mut strongest: Option<f64> = None;

        for event in &catalog.features {
            if event.properties.place.is_some() {
                s.with_place += 1;
            }

            if event.depth_km().is_some() {
                s.with_depth += 1;
            }

            if let Some(year) = event.year() {
                s.first_year = Some(s.first_year.map_or(year, |y| y.min(year)));
                s.last_year = Some(s.last_year.map_or(year, |y| y.max(year)));
            }

            match event.magnitude() {
                Some(mag) => {
                    s.with_magnitude += 1;

                    // Strict comparison: on a tie the earlier event wins,
                    // since catalogs are queried in time-ascending order.
                    if strongest.is_none_or(|best| mag > best) {
                        strongest = Some(mag);
                        s.strongest_magnitude = Some(mag);
                        s.strongest_place = Some(event.place().to_string());
                        s.strongest_latitude = event.latitude();
                        s.strongest_longitude = event.longitude();
                        s.strongest_depth_km = event.depth_km();
                        s.strongest_time = event.time();
                    }
                }
                None => {
                    s.missing_magnitude += 1;
                }
            }
        }

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn magnitude_coverage_pct(&self) -> f64 {
        Self::pct(self.with_magnitude, self.total_events)
    }

    /// Create an error record with timestamp and error information
    pub fn from_error(error_type: &str, error_message: &str) -> Self {
        CatalogStats {
            timestamp: Utc::now(),
            error_type: Some(error_type.to_string()),
            error_message: Some(error_message.to_string()),
            ..Default::default()
        }
    }

    /// Set the region label this catalog was queried for
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Event, EventProperties, Geometry};

    fn event(mag: Option<f64>, place: Option<&str>, time_ms: i64, coords: &[f64]) -> Event {
        Event {
            id: None,
            properties: EventProperties {
                mag,
                place: place.map(str::to_string),
                time: Some(time_ms),
            },
            geometry: Some(Geometry {
                coordinates: coords.to_vec(),
            }),
        }
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(CatalogStats::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(CatalogStats::pct(50, 100), 50.0);
        assert_eq!(CatalogStats::pct(1, 4), 25.0);
    }

    #[test]
    fn test_from_catalog_empty() {
        let stats = CatalogStats::from_catalog(&Catalog::default());

        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.strongest_magnitude, None);
        assert_eq!(stats.first_year, None);
    }

    #[test]
    fn test_strongest_event_wins() {
        let catalog = Catalog {
            metadata: None,
            features: vec![
                // 2000-06-15
                event(Some(2.6), Some("Lleyn Peninsula, Wales"), 961_027_200_000, &[-4.5, 52.9, 8.2]),
                // 2008-02-27, the strongest
                event(Some(5.2), Some("Market Rasen, England"), 1_204_070_400_000, &[-0.33, 53.4, 18.6]),
                event(Some(3.3), Some("Cwmllynfell, Wales"), 1_516_406_400_000, &[-3.9, 51.8, 7.0]),
            ],
        };

        let stats = CatalogStats::from_catalog(&catalog);

        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.with_magnitude, 3);
        assert_eq!(stats.strongest_magnitude, Some(5.2));
        assert_eq!(stats.strongest_place.as_deref(), Some("Market Rasen, England"));
        assert_eq!(stats.strongest_latitude, Some(53.4));
        assert_eq!(stats.strongest_depth_km, Some(18.6));
        assert_eq!(stats.first_year, Some(2000));
        assert_eq!(stats.last_year, Some(2018));
    }

    #[test]
    fn test_tie_keeps_first_event() {
        let catalog = Catalog {
            metadata: None,
            features: vec![
                event(Some(4.0), Some("first"), 961_027_200_000, &[-4.5, 52.9, 8.2]),
                event(Some(4.0), Some("second"), 1_204_070_400_000, &[-0.33, 53.4, 18.6]),
            ],
        };

        let stats = CatalogStats::from_catalog(&catalog);
        assert_eq!(stats.strongest_place.as_deref(), Some("first"));
    }

    #[test]
    fn test_null_magnitude_counted_but_never_strongest() {
        let catalog = Catalog {
            metadata: None,
            features: vec![
                event(None, None, 1_028_160_000_000, &[-3.0, 53.0]),
                event(Some(1.5), Some("somewhere"), 1_110_412_800_000, &[-1.6, 53.5, 10.0]),
            ],
        };

        let stats = CatalogStats::from_catalog(&catalog);

        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.with_magnitude, 1);
        assert_eq!(stats.missing_magnitude, 1);
        assert_eq!(stats.with_place, 1);
        assert_eq!(stats.with_depth, 1);
        assert_eq!(stats.strongest_magnitude, Some(1.5));
        assert_eq!(stats.magnitude_coverage_pct(), 50.0);
    }

    #[test]
    fn test_from_error() {
        let stats = CatalogStats::from_error("fetch_error", "connection refused").with_region("uk");

        assert_eq!(stats.error_type.as_deref(), Some("fetch_error"));
        assert_eq!(stats.error_message.as_deref(), Some("connection refused"));
        assert_eq!(stats.region.as_deref(), Some("uk"));
        assert_eq!(stats.total_events, 0);
    }
}
