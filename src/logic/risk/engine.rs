use super::{
    fungal_blight::FungalBlightRule, waterborne_pest::WaterbornePestRule, wilting::WiltingRule,
    RiskRule,
};
use crate::models::{MonthlyClimate, RiskAssessment, RiskLevel};

/// Evaluates the fixed climate-risk rule set over one monthly climate.
///
/// Warning order follows rule registration order, not severity.
pub struct RiskEngine {
    rules: Vec<Box<dyn RiskRule>>,
}

impl RiskEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn RiskRule>> = vec![
            Box::new(FungalBlightRule),
            Box::new(WaterbornePestRule),
            Box::new(WiltingRule),
        ];

        Self { rules }
    }

    pub fn assess(&self, climate: &MonthlyClimate) -> RiskAssessment {
        let mut score = 0u32;
        let mut warnings = Vec::new();

        for rule in &self.rules {
            if let Some(factor) = rule.evaluate(climate) {
                score += factor.weight;
                warnings.push(factor.warning.to_string());
            }
        }

        RiskAssessment {
            score,
            level: RiskLevel::from_score(score),
            warnings,
        }
    }

    pub fn list_rules(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fungal_blight_alone_is_medium() {
        let assessment = RiskEngine::new().assess(&MonthlyClimate::new(25.0, 85.0, 50.0));
        assert_eq!(assessment.score, 60);
        assert_eq!(assessment.level, RiskLevel::Medium);
        assert_eq!(assessment.warnings.len(), 1);
        assert!(assessment.warnings[0].contains("fungal blight"));
    }

    #[test]
    fn pest_alone_is_low() {
        let assessment = RiskEngine::new().assess(&MonthlyClimate::new(25.0, 50.0, 250.0));
        assert_eq!(assessment.score, 20);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert_eq!(assessment.warnings.len(), 1);
        assert!(assessment.warnings[0].contains("water-borne pests"));
    }

    #[test]
    fn wilting_alone_sits_on_the_medium_boundary() {
        let assessment = RiskEngine::new().assess(&MonthlyClimate::new(40.0, 50.0, 10.0));
        assert_eq!(assessment.score, 70);
        // score > 70 is required for high, so exactly 70 stays medium
        assert_eq!(assessment.level, RiskLevel::Medium);
    }

    #[test]
    fn rules_accumulate_in_declaration_order() {
        let assessment = RiskEngine::new().assess(&MonthlyClimate::new(40.0, 85.0, 10.0));
        // Humidity 85 misses the fungal band (temp 40), so only wilting fires
        assert_eq!(assessment.score, 70);

        // Humidity + warmth + heavy rain fires rules 1 and 2
        let assessment = RiskEngine::new().assess(&MonthlyClimate::new(25.0, 85.0, 250.0));
        assert_eq!(assessment.score, 80);
        assert_eq!(assessment.level, RiskLevel::High);
        assert!(assessment.warnings[0].contains("fungal blight"));
        assert!(assessment.warnings[1].contains("water-borne pests"));
    }

    #[test]
    fn calm_climate_scores_zero() {
        let assessment = RiskEngine::new().assess(&MonthlyClimate::new(22.0, 60.0, 80.0));
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.warnings.is_empty());
    }

    #[test]
    fn assessment_is_idempotent() {
        let engine = RiskEngine::new();
        let climate = MonthlyClimate::new(25.0, 85.0, 250.0);
        let a = engine.assess(&climate);
        let b = engine.assess(&climate);
        assert_eq!(a.score, b.score);
        assert_eq!(a.level, b.level);
        assert_eq!(a.warnings, b.warnings);
    }

    #[test]
    fn three_rules_registered() {
        assert_eq!(
            RiskEngine::new().list_rules(),
            vec!["fungal_blight", "waterborne_pest", "wilting"]
        );
    }
}
