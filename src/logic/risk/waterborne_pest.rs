use super::{RiskFactor, RiskRule};
use crate::models::MonthlyClimate;

/// Water-borne pest risk rule
///
/// Heavy monthly rainfall (>200mm) creates standing water that breeds
/// water-borne pests.
pub struct WaterbornePestRule;

impl RiskRule for WaterbornePestRule {
    fn id(&self) -> &'static str {
        "waterborne_pest"
    }

    fn evaluate(&self, climate: &MonthlyClimate) -> Option<RiskFactor> {
        if climate.rainfall_mm <= 200.0 {
            return None;
        }

        Some(RiskFactor {
            weight: 20,
            warning: "Heavy rainfall: Monitor for water-borne pests.",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_above_200mm() {
        let rule = WaterbornePestRule;
        assert!(rule.evaluate(&MonthlyClimate::new(25.0, 50.0, 200.0)).is_none());
        assert_eq!(
            rule.evaluate(&MonthlyClimate::new(25.0, 50.0, 200.1))
                .unwrap()
                .weight,
            20
        );
    }
}
