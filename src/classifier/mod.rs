pub mod forest;

pub use forest::DecisionForest;

use crate::error::Result;

/// Capability interface over the frozen recommendation artifact.
///
/// Input is the fixed 7-feature vector (N, P, K, temperature, humidity,
/// ph, rainfall); output is the single best-fit crop label. Inference
/// failure propagates as a request-level error, never a silent fallback.
pub trait CropClassifier: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<String>;
}
