use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Where a monthly climate value came from.
///
/// `Fallback` means the archive fetch failed (or returned nothing for the
/// target month) and the fixed defaults were substituted. Consumed for
/// diagnostics only; never surfaced to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Fetched,
    Fallback,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Fetched => "fetched",
            Provenance::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate climate for one calendar month at one coordinate pair.
///
/// Temperature and humidity are monthly means; rainfall is the monthly sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyClimate {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub rainfall_mm: f64,
}

impl MonthlyClimate {
    pub fn new(temperature_c: f64, humidity_percent: f64, rainfall_mm: f64) -> Self {
        Self {
            temperature_c,
            humidity_percent,
            rainfall_mm,
        }
    }
}

/// One year of hourly observations, timezone-anchored to the configured
/// reference timezone so month boundaries are deterministic.
///
/// All four vectors have equal length; the client validates this on parse.
#[derive(Debug, Clone, Default)]
pub struct HourlySeries {
    pub times: Vec<NaiveDateTime>,
    pub temperature_c: Vec<f64>,
    pub humidity_percent: Vec<f64>,
    pub precipitation_mm: Vec<f64>,
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
