use super::climate::MonthlyClimate;
use super::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// Typed advisory input. The caller (CLI or any other thin adapter) has
/// already validated types; the core never parses wire formats.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryRequest {
    pub lat: f64,
    pub lon: f64,
    pub soil_type: String,
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ph: f64,
    pub user_crop: Option<String>,
}

/// Climate snapshot in the response, rounded to one decimal place.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temp: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl From<&MonthlyClimate> for WeatherSnapshot {
    fn from(climate: &MonthlyClimate) -> Self {
        Self {
            temp: round1(climate.temperature_c),
            humidity: round1(climate.humidity_percent),
            rainfall: round1(climate.rainfall_mm),
        }
    }
}

/// The aggregate advisory returned per request. Constructed fresh each time;
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    pub location: String,
    pub coordinates: (f64, f64),
    pub recommended_crop: String,
    pub risk_level: RiskLevel,
    pub alerts: Vec<String>,
    pub weather: WeatherSnapshot,
    pub message: String,
}
