pub mod advisor;
pub mod aggregation;
pub mod risk;
pub mod viability;

pub use advisor::AdvisoryService;
pub use risk::RiskEngine;
