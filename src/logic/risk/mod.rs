pub mod engine;
pub mod fungal_blight;
pub mod waterborne_pest;
pub mod wilting;

pub use engine::RiskEngine;

use crate::models::MonthlyClimate;

/// A triggered rule: its fixed score weight plus the warning shown to the
/// farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskFactor {
    pub weight: u32,
    pub warning: &'static str,
}

/// Trait for climate risk rules.
///
/// Rules are evaluated independently; a single climate can trigger several
/// at once and their weights accumulate additively, uncapped.
pub trait RiskRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Evaluate the rule and return a factor if conditions are met
    fn evaluate(&self, climate: &MonthlyClimate) -> Option<RiskFactor>;
}
