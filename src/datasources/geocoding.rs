use crate::config::GeocodingConfig;
use crate::error::{AdvisoryError, Result};
use serde::Deserialize;
use std::time::Duration;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Reverse geocoding through the OpenWeatherMap current-weather endpoint,
/// which carries a display name for the queried coordinates.
pub struct GeocodingClient {
    client: reqwest::Client,
    config: GeocodingConfig,
}

#[derive(Debug, Deserialize)]
struct OwmWeatherResponse {
    #[serde(default)]
    name: Option<String>,
}

impl GeocodingClient {
    pub fn new(config: GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Resolve a display name for the coordinates. Every failure mode
    /// degrades to `UNKNOWN_LOCATION`; the advisory never blocks on
    /// geocoding.
    pub async fn location_name(&self, lat: f64, lon: f64) -> String {
        match self.fetch_name(lat, lon).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Geocoding failed, using fallback name: {}", e);
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    async fn fetch_name(&self, lat: f64, lon: f64) -> Result<String> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, lat, lon, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AdvisoryError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            return Err(AdvisoryError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}",
                response.status()
            )));
        }

        let payload: OwmWeatherResponse = response.json().await.map_err(|e| {
            AdvisoryError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(payload
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()))
    }

    /// Probe connectivity and key validity; used by `check`.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/weather?lat=0&lon=0&appid={}&units=metric",
            API_BASE_URL, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AdvisoryError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }
}
