use crate::classifier::CropClassifier;
use crate::datasources::{geocoding::UNKNOWN_LOCATION, GeocodingClient, OpenMeteoClient};
use crate::error::Result;
use crate::logic::aggregation::resolve_monthly;
use crate::logic::risk::RiskEngine;
use crate::logic::viability::check_viability;
use crate::models::{
    AdvisoryRequest, AdvisoryResponse, MonthlyClimate, RiskAssessment, ViabilityVerdict,
    WeatherSnapshot,
};
use crate::reference::CropRangeTable;
use chrono::{Datelike, Local};

/// Wires the reference data, classifier artifact and external datasources
/// into the per-request advisory pipeline.
///
/// All held state is read-only after construction, so one service instance
/// can serve any number of concurrent requests.
pub struct AdvisoryService {
    ranges: CropRangeTable,
    classifier: Box<dyn CropClassifier>,
    climate: OpenMeteoClient,
    geocoder: Option<GeocodingClient>,
    risk_engine: RiskEngine,
}

impl AdvisoryService {
    pub fn new(
        ranges: CropRangeTable,
        classifier: Box<dyn CropClassifier>,
        climate: OpenMeteoClient,
        geocoder: Option<GeocodingClient>,
    ) -> Self {
        if geocoder.is_none() {
            tracing::info!("Geocoding not configured - locations will show as unknown");
        }

        Self {
            ranges,
            classifier,
            climate,
            geocoder,
            risk_engine: RiskEngine::new(),
        }
    }

    /// Run the full advisory pipeline for one request.
    ///
    /// Degraded geocoding and climate fetches resolve to fallbacks; a
    /// classifier inference failure is the one error that propagates.
    pub async fn advise(&self, request: &AdvisoryRequest) -> Result<AdvisoryResponse> {
        let now = Local::now();
        let reference_year = now.year() - 1;
        let target_month = now.month();

        let location = match &self.geocoder {
            Some(geocoder) => geocoder.location_name(request.lat, request.lon).await,
            None => UNKNOWN_LOCATION.to_string(),
        };

        let fetched = self
            .climate
            .fetch_hourly_year(request.lat, request.lon, reference_year)
            .await;
        let (climate, provenance) = resolve_monthly(fetched, target_month);
        tracing::debug!("Monthly climate resolved ({})", provenance);

        let features = [
            request.n,
            request.p,
            request.k,
            climate.temperature_c,
            climate.humidity_percent,
            request.ph,
            climate.rainfall_mm,
        ];
        let recommended_crop = self.classifier.predict(&features)?;

        let risk = self.risk_engine.assess(&climate);

        let viability = request.user_crop.as_deref().map(|crop| {
            check_viability(&self.ranges, crop, &climate, request.ph)
        });

        Ok(build_response(
            request,
            location,
            month_name(target_month),
            &climate,
            recommended_crop,
            risk,
            viability,
        ))
    }
}

/// Pure response assembly, split out of `advise` so composition is testable
/// without a running service.
fn build_response(
    request: &AdvisoryRequest,
    location: String,
    month: &str,
    climate: &MonthlyClimate,
    recommended_crop: String,
    risk: RiskAssessment,
    viability: Option<ViabilityVerdict>,
) -> AdvisoryResponse {
    let focus = match &viability {
        Some(verdict) => verdict.message.clone(),
        None => format!("Our AI suggests planting {}.", recommended_crop),
    };

    let message = format!(
        "It is {} in {}. Conditions: {:.1}°C, {:.1}mm rain. {} Risk level: {}.",
        month, location, climate.temperature_c, climate.rainfall_mm, focus, risk.level
    );

    AdvisoryResponse {
        location,
        coordinates: (request.lat, request.lon),
        recommended_crop,
        risk_level: risk.level,
        alerts: risk.warnings,
        weather: WeatherSnapshot::from(climate),
        message,
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
