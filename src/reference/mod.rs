pub mod dataset;
pub mod ranges;

pub use dataset::{load_records, HistoricalRecord};
pub use ranges::{CropProfile, CropRangeTable, Feature, FeatureRange};
