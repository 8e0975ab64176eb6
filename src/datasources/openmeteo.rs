use crate::config::ClimateConfig;
use crate::error::{AdvisoryError, Result};
use crate::models::HourlySeries;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::time::Duration;

const API_BASE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Client for the Open-Meteo historical weather archive.
///
/// Fetches a full calendar year of hourly observations anchored to the
/// configured reference timezone, so month boundaries are deterministic
/// regardless of caller locale.
pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: ClimateConfig,
}

// Open-Meteo archive API response structures
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    hourly: ArchiveHourly,
}

#[derive(Debug, Deserialize)]
struct ArchiveHourly {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    relative_humidity_2m: Vec<Option<f64>>,
    precipitation: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: ClimateConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch one calendar year of hourly temperature, relative humidity and
    /// precipitation for a coordinate pair.
    pub async fn fetch_hourly_year(&self, lat: f64, lon: f64, year: i32) -> Result<HourlySeries> {
        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}-01-01&end_date={}-12-31\
             &hourly=temperature_2m,relative_humidity_2m,precipitation&timezone={}",
            API_BASE_URL, lat, lon, year, year, self.config.timezone
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AdvisoryError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisoryError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let archive: ArchiveResponse = response.json().await.map_err(|e| {
            AdvisoryError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        let series = convert_hourly(archive.hourly)?;
        tracing::debug!("Parsed {} hourly archive samples", series.len());
        Ok(series)
    }

    /// Probe the archive with a minimal request; used by `check`.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}?latitude=0&longitude=0&start_date=2020-01-01&end_date=2020-01-01\
             &hourly=temperature_2m&timezone={}",
            API_BASE_URL, self.config.timezone
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AdvisoryError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn convert_hourly(hourly: ArchiveHourly) -> Result<HourlySeries> {
    let n = hourly.time.len();
    if n == 0 {
        return Err(AdvisoryError::InvalidData(
            "Open-Meteo returned an empty hourly series".into(),
        ));
    }
    if hourly.temperature_2m.len() != n
        || hourly.relative_humidity_2m.len() != n
        || hourly.precipitation.len() != n
    {
        return Err(AdvisoryError::InvalidData(
            "Open-Meteo hourly arrays have mismatched lengths".into(),
        ));
    }

    let mut series = HourlySeries::default();
    for i in 0..n {
        // Rows with any missing value are dropped rather than imputed.
        let (Some(temp), Some(humidity), Some(precip)) = (
            hourly.temperature_2m[i],
            hourly.relative_humidity_2m[i],
            hourly.precipitation[i],
        ) else {
            continue;
        };

        let time = parse_local_time(&hourly.time[i])?;
        series.times.push(time);
        series.temperature_c.push(temp);
        series.humidity_percent.push(humidity);
        series.precipitation_mm.push(precip);
    }

    if series.is_empty() {
        return Err(AdvisoryError::InvalidData(
            "Open-Meteo hourly series has no complete rows".into(),
        ));
    }

    Ok(series)
}

/// Open-Meteo emits local timestamps like `2024-06-01T13:00` when a
/// timezone parameter is given.
fn parse_local_time(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").map_err(|_| {
        AdvisoryError::InvalidData(format!("unparseable Open-Meteo timestamp '{}'", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_local_timestamps() {
        let t = parse_local_time("2024-06-01T13:00").unwrap();
        assert_eq!(t.month(), 6);
        assert_eq!(t.hour(), 13);
        assert!(parse_local_time("June 1st").is_err());
    }

    #[test]
    fn convert_drops_rows_with_missing_values() {
        let hourly = ArchiveHourly {
            time: vec!["2024-01-01T00:00".into(), "2024-01-01T01:00".into()],
            temperature_2m: vec![Some(20.0), None],
            relative_humidity_2m: vec![Some(70.0), Some(71.0)],
            precipitation: vec![Some(0.0), Some(0.1)],
        };
        let series = convert_hourly(hourly).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.temperature_c[0], 20.0);
    }

    #[test]
    fn convert_rejects_mismatched_arrays() {
        let hourly = ArchiveHourly {
            time: vec!["2024-01-01T00:00".into(), "2024-01-01T01:00".into()],
            temperature_2m: vec![Some(20.0)],
            relative_humidity_2m: vec![Some(70.0), Some(71.0)],
            precipitation: vec![Some(0.0), Some(0.1)],
        };
        assert!(convert_hourly(hourly).is_err());
    }

    #[test]
    fn convert_rejects_empty_series() {
        let hourly = ArchiveHourly {
            time: vec![],
            temperature_2m: vec![],
            relative_humidity_2m: vec![],
            precipitation: vec![],
        };
        assert!(convert_hourly(hourly).is_err());
    }
}
