//! GeoJSON parser for the USGS FDSN event service.
//!
//! Only the subset of the FeatureCollection we actually consume is typed;
//! everything else in the provider's schema is ignored.

use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

/// A full query response: one GeoJSON FeatureCollection of seismic events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub metadata: Option<CatalogMetadata>,
    #[serde(default)]
    pub features: Vec<Event>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogMetadata {
    pub title: Option<String>,
    pub count: Option<u64>,
}

/// One GeoJSON Feature: a single seismic event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    pub id: Option<String>,
    #[serde(default)]
    pub properties: EventProperties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// `mag` and `place` are nullable upstream; `time` is milliseconds since epoch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventProperties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    pub time: Option<i64>,
}

/// Point geometry. Coordinates are ordered longitude, latitude, depth (km),
/// and the depth component is not guaranteed to be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Event {
    pub fn magnitude(&self) -> Option<f64> {
        self.properties.mag
    }

    pub fn place(&self) -> &str {
        self.properties.place.as_deref().unwrap_or("Unknown location")
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinate(0)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate(1)
    }

    pub fn depth_km(&self) -> Option<f64> {
        self.coordinate(2)
    }

    /// Event time as UTC; `None` when the timestamp is missing or outside
    /// the representable range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.properties
            .time
            .and_then(DateTime::from_timestamp_millis)
    }

    /// UTC calendar year of the event.
    pub fn year(&self) -> Option<i32> {
        self.time().map(|t| t.year())
    }

    fn coordinate(&self, index: usize) -> Option<f64> {
        self.geometry
            .as_ref()
            .and_then(|g| g.coordinates.get(index).copied())
    }
}

/// Decodes a GeoJSON event [`Catalog`] from raw response bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON for a FeatureCollection.
pub fn parse_catalog(bytes: &[u8]) -> Result<Catalog> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_catalog() {
        let json = br#"{
            "type": "FeatureCollection",
            "metadata": {"title": "USGS Earthquakes", "count": 1},
            "features": [{
                "type": "Feature",
                "id": "usp0007xyz",
                "properties": {"mag": 4.7, "place": "Dudley, England", "time": 1028160000000},
                "geometry": {"type": "Point", "coordinates": [-2.1, 52.5, 9.4]}
            }]
        }"#;

        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.metadata.unwrap().count, Some(1));
        assert_eq!(catalog.features.len(), 1);

        let event = &catalog.features[0];
        assert_eq!(event.magnitude(), Some(4.7));
        assert_eq!(event.place(), "Dudley, England");
        assert_eq!(event.longitude(), Some(-2.1));
        assert_eq!(event.latitude(), Some(52.5));
        assert_eq!(event.depth_km(), Some(9.4));
        assert_eq!(event.year(), Some(2002));
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let result = parse_catalog(b"not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_feature_collection() {
        let catalog = parse_catalog(br#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(catalog.features.is_empty());
    }

    #[test]
    fn test_null_magnitude_and_place() {
        let json = br#"{
            "features": [{
                "properties": {"mag": null, "place": null, "time": 1028160000000},
                "geometry": {"coordinates": [-3.0, 53.0]}
            }]
        }"#;

        let catalog = parse_catalog(json).unwrap();
        let event = &catalog.features[0];
        assert_eq!(event.magnitude(), None);
        assert_eq!(event.place(), "Unknown location");
        // Two-element coordinates: no depth.
        assert_eq!(event.latitude(), Some(53.0));
        assert_eq!(event.depth_km(), None);
    }

    #[test]
    fn test_missing_time_has_no_year() {
        let event = Event::default();
        assert_eq!(event.time(), None);
        assert_eq!(event.year(), None);
    }

    #[test]
    fn test_year_is_utc() {
        // 1999-12-31T23:30:00Z must stay in 1999 regardless of host timezone.
        let event = Event {
            properties: EventProperties {
                time: Some(946_682_200_000),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(event.year(), Some(1999));
    }
}
