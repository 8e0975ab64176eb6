use super::{RiskFactor, RiskRule};
use crate::models::MonthlyClimate;

/// Wilting risk rule
///
/// Extreme heat with almost no rainfall puts crops at high risk of wilting.
///
/// Conditions:
/// - Rainfall <20mm
/// - Temperature >35°C
pub struct WiltingRule;

impl RiskRule for WiltingRule {
    fn id(&self) -> &'static str {
        "wilting"
    }

    fn evaluate(&self, climate: &MonthlyClimate) -> Option<RiskFactor> {
        let dry = climate.rainfall_mm < 20.0;
        let hot = climate.temperature_c > 35.0;

        if !dry || !hot {
            return None;
        }

        Some(RiskFactor {
            weight: 70,
            warning: "Extreme heat and low rainfall: Your crops are at high risk of wilting.",
        })
    }
}
