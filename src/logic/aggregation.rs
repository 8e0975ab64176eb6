use crate::error::Result;
use crate::models::{HourlySeries, MonthlyClimate, Provenance};
use chrono::Datelike;

/// Fixed defaults substituted whenever the climate archive cannot supply
/// the target month. The advisory degrades gracefully instead of blocking
/// a farmer's request on third-party availability.
pub const FALLBACK_CLIMATE: MonthlyClimate = MonthlyClimate {
    temperature_c: 25.0,
    humidity_percent: 70.0,
    rainfall_mm: 100.0,
};

/// Aggregate the samples falling in `month` (1-12): arithmetic mean of
/// temperature and humidity, sum of precipitation. Returns `None` when the
/// month has no samples (partial-year data behaves like a fetch failure).
pub fn aggregate_month(series: &HourlySeries, month: u32) -> Option<MonthlyClimate> {
    let mut temp_sum = 0.0;
    let mut humidity_sum = 0.0;
    let mut rainfall_sum = 0.0;
    let mut count = 0usize;

    for (i, time) in series.times.iter().enumerate() {
        if time.month() != month {
            continue;
        }
        temp_sum += series.temperature_c[i];
        humidity_sum += series.humidity_percent[i];
        rainfall_sum += series.precipitation_mm[i];
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(MonthlyClimate {
        temperature_c: temp_sum / count as f64,
        humidity_percent: humidity_sum / count as f64,
        rainfall_mm: rainfall_sum,
    })
}

/// Resolve a fetch outcome into a monthly climate plus its provenance.
///
/// Any fetch error or empty target-month bucket yields the fixed fallback
/// triple; the failure is logged and never propagated.
pub fn resolve_monthly(
    fetched: Result<HourlySeries>,
    month: u32,
) -> (MonthlyClimate, Provenance) {
    match fetched {
        Ok(series) => match aggregate_month(&series, month) {
            Some(climate) => (climate, Provenance::Fetched),
            None => {
                tracing::warn!(
                    "No archive samples for month {}, using fallback climate",
                    month
                );
                (FALLBACK_CLIMATE, Provenance::Fallback)
            }
        },
        Err(e) => {
            tracing::warn!("Climate archive unavailable, using fallback: {}", e);
            (FALLBACK_CLIMATE, Provenance::Fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisoryError;
    use chrono::NaiveDate;

    fn push(series: &mut HourlySeries, month: u32, day: u32, temp: f64, hum: f64, rain: f64) {
        let time = NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        series.times.push(time);
        series.temperature_c.push(temp);
        series.humidity_percent.push(hum);
        series.precipitation_mm.push(rain);
    }

    fn synthetic_year() -> HourlySeries {
        let mut series = HourlySeries::default();
        // Month 6: known mean temp 25.0, mean humidity 80.0, rain sum 12.0
        push(&mut series, 6, 1, 20.0, 75.0, 2.0);
        push(&mut series, 6, 2, 30.0, 85.0, 10.0);
        // Month 7: different values that must not bleed into June
        push(&mut series, 7, 1, 35.0, 50.0, 0.0);
        series
    }

    #[test]
    fn target_month_gets_mean_and_sum() {
        let climate = aggregate_month(&synthetic_year(), 6).unwrap();
        assert_eq!(climate.temperature_c, 25.0);
        assert_eq!(climate.humidity_percent, 80.0);
        assert_eq!(climate.rainfall_mm, 12.0);
    }

    #[test]
    fn empty_month_yields_none() {
        assert!(aggregate_month(&synthetic_year(), 2).is_none());
    }

    #[test]
    fn resolve_tags_successful_fetch() {
        let (climate, provenance) = resolve_monthly(Ok(synthetic_year()), 6);
        assert_eq!(provenance, Provenance::Fetched);
        assert_eq!(climate.temperature_c, 25.0);
    }

    #[test]
    fn resolve_falls_back_on_fetch_error() {
        let failed = Err(AdvisoryError::DataSourceUnavailable("down".into()));
        let (climate, provenance) = resolve_monthly(failed, 6);
        assert_eq!(provenance, Provenance::Fallback);
        assert_eq!(climate, FALLBACK_CLIMATE);
        assert_eq!(climate.temperature_c, 25.0);
        assert_eq!(climate.humidity_percent, 70.0);
        assert_eq!(climate.rainfall_mm, 100.0);
    }

    #[test]
    fn resolve_falls_back_on_partial_year() {
        let (climate, provenance) = resolve_monthly(Ok(synthetic_year()), 12);
        assert_eq!(provenance, Provenance::Fallback);
        assert_eq!(climate, FALLBACK_CLIMATE);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let series = synthetic_year();
        let first = aggregate_month(&series, 6).unwrap();
        let second = aggregate_month(&series, 6).unwrap();
        assert_eq!(first, second);
    }
}
