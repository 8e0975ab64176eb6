use serde::{Deserialize, Serialize};

/// Verdict for one (crop, climate, pH) combination.
///
/// An unknown crop label is a normal negative verdict, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViabilityVerdict {
    pub viable: bool,
    pub message: String,
}

impl ViabilityVerdict {
    pub fn viable(message: impl Into<String>) -> Self {
        Self {
            viable: true,
            message: message.into(),
        }
    }

    pub fn not_viable(message: impl Into<String>) -> Self {
        Self {
            viable: false,
            message: message.into(),
        }
    }
}
