use super::{RiskFactor, RiskRule};
use crate::models::MonthlyClimate;

/// Fungal blight risk rule
///
/// Sustained high humidity combined with warm (but not extreme) temperatures
/// favors fungal pathogens.
///
/// Conditions:
/// - Humidity >80%
/// - Temperature between 20°C and 30°C inclusive
pub struct FungalBlightRule;

impl RiskRule for FungalBlightRule {
    fn id(&self) -> &'static str {
        "fungal_blight"
    }

    fn evaluate(&self, climate: &MonthlyClimate) -> Option<RiskFactor> {
        let humid = climate.humidity_percent > 80.0;
        let warm = (20.0..=30.0).contains(&climate.temperature_c);

        if !humid || !warm {
            return None;
        }

        Some(RiskFactor {
            weight: 60,
            warning: "Heavy rainfall and warmth: Your crops are at risk of fungal blight.",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_only_in_the_warm_humid_band() {
        let rule = FungalBlightRule;
        let hit = MonthlyClimate::new(25.0, 85.0, 50.0);
        assert_eq!(rule.evaluate(&hit).unwrap().weight, 60);

        // Temperature bounds are inclusive
        assert!(rule.evaluate(&MonthlyClimate::new(20.0, 85.0, 50.0)).is_some());
        assert!(rule.evaluate(&MonthlyClimate::new(30.0, 85.0, 50.0)).is_some());

        // Outside the band
        assert!(rule.evaluate(&MonthlyClimate::new(19.9, 85.0, 50.0)).is_none());
        assert!(rule.evaluate(&MonthlyClimate::new(31.0, 85.0, 50.0)).is_none());
        assert!(rule.evaluate(&MonthlyClimate::new(25.0, 80.0, 50.0)).is_none());
    }
}
