use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

use crate::services::event_api::{EventApi, EventQuery};
use quake_stats::parser::{Catalog, parse_catalog};

const DEFAULT_BASE_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Client for the USGS FDSN event web service.
///
/// The service is public and unauthenticated; its request/response schema is
/// the provider's, not ours.
pub struct UsgsClient {
    base_url: String,
}

impl UsgsClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the service endpoint, for tests or mirrors.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Builds the full GET URL for a query.
    pub fn request_url(&self, query: &EventQuery) -> Result<Url> {
        let params = [
            ("format", "geojson".to_string()),
            ("starttime", query.start_time.format("%Y-%m-%d").to_string()),
            ("endtime", query.end_time.format("%Y-%m-%d").to_string()),
            ("minlatitude", query.min_latitude.to_string()),
            ("maxlatitude", query.max_latitude.to_string()),
            ("minlongitude", query.min_longitude.to_string()),
            ("maxlongitude", query.max_longitude.to_string()),
            ("minmagnitude", query.min_magnitude.to_string()),
            ("orderby", query.order_by.as_str().to_string()),
        ];

        Ok(Url::parse_with_params(&self.base_url, &params)?)
    }

    /// Runs the query and returns the raw GeoJSON response body.
    ///
    /// Kept separate from [`EventApi::query_events`] so the `fetch`
    /// subcommand can cache the untouched body to disk.
    pub async fn fetch_raw(&self, query: &EventQuery) -> Result<Vec<u8>> {
        let url = self.request_url(query)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send request: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("API returned status {}: {}", status, body));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for UsgsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventApi for UsgsClient {
    async fn query_events(&self, query: &EventQuery) -> Result<Catalog> {
        let bytes = self.fetch_raw(query).await?;
        parse_catalog(&bytes)
    }
}
