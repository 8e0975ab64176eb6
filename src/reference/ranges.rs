use crate::error::{AdvisoryError, Result};
use crate::reference::dataset::HistoricalRecord;
use std::collections::HashMap;

/// One measured or supplied quantity tracked per crop.
///
/// The declaration order is the classifier's fixed input order
/// (N, P, K, temperature, humidity, ph, rainfall).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Feature {
    pub const COUNT: usize = 7;

    /// Classifier input order.
    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Nitrogen,
        Feature::Phosphorus,
        Feature::Potassium,
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Fixed order of the viability check.
    pub const VIABILITY: [Feature; 4] = [
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Capitalized name used in user-facing viability messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::Nitrogen => "Nitrogen",
            Feature::Phosphorus => "Phosphorus",
            Feature::Potassium => "Potassium",
            Feature::Temperature => "Temperature",
            Feature::Humidity => "Humidity",
            Feature::Ph => "Ph",
            Feature::Rainfall => "Rainfall",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Empirical `(min, max)` extent of one feature across all historical
/// records for one crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Observed feature ranges for one crop label.
#[derive(Debug, Clone)]
pub struct CropProfile {
    pub label: String,
    ranges: [FeatureRange; Feature::COUNT],
}

impl CropProfile {
    pub fn range(&self, feature: Feature) -> FeatureRange {
        self.ranges[feature.index()]
    }
}

/// Per-crop feature ranges derived once at startup from the historical
/// dataset. Read-only thereafter; shared freely across in-flight requests.
#[derive(Debug, Clone)]
pub struct CropRangeTable {
    crops: HashMap<String, CropProfile>,
}

impl CropRangeTable {
    /// Group records by label and take the min/max of every feature.
    /// The known labels are exactly the distinct labels in the dataset.
    pub fn from_records(records: &[HistoricalRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(AdvisoryError::InvalidData(
                "cannot derive crop ranges from an empty dataset".into(),
            ));
        }

        let mut crops: HashMap<String, CropProfile> = HashMap::new();

        for record in records {
            let label = record.label.trim().to_lowercase();
            let profile = crops.entry(label.clone()).or_insert_with(|| CropProfile {
                label,
                ranges: Feature::ALL.map(|f| FeatureRange {
                    min: record.feature(f),
                    max: record.feature(f),
                }),
            });

            for feature in Feature::ALL {
                let value = record.feature(feature);
                let range = &mut profile.ranges[feature.index()];
                range.min = range.min.min(value);
                range.max = range.max.max(value);
            }
        }

        tracing::info!("Derived feature ranges for {} crops", crops.len());
        Ok(Self { crops })
    }

    /// Look up a crop profile by label, case-insensitively and
    /// whitespace-trimmed.
    pub fn get(&self, label: &str) -> Option<&CropProfile> {
        self.crops.get(&normalize(label))
    }

    pub fn range_of(&self, label: &str, feature: Feature) -> Result<FeatureRange> {
        self.get(label)
            .map(|profile| profile.range(feature))
            .ok_or_else(|| AdvisoryError::UnknownCrop(normalize(label)))
    }

    pub fn crop_count(&self) -> usize {
        self.crops.len()
    }
}

pub(crate) fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, temperature: f64, rainfall: f64) -> HistoricalRecord {
        HistoricalRecord {
            n: 90.0,
            p: 40.0,
            k: 40.0,
            temperature,
            humidity: 80.0,
            ph: 6.5,
            rainfall,
            label: label.to_string(),
        }
    }

    fn sample_records() -> Vec<HistoricalRecord> {
        vec![
            record("rice", 20.0, 180.0),
            record("rice", 27.0, 300.0),
            record("rice", 23.5, 250.0),
            record("mango", 30.0, 60.0),
        ]
    }

    #[test]
    fn ranges_are_empirical_extents() {
        let table = CropRangeTable::from_records(&sample_records()).unwrap();
        let temp = table.range_of("rice", Feature::Temperature).unwrap();
        assert_eq!(temp.min, 20.0);
        assert_eq!(temp.max, 27.0);
        let rain = table.range_of("rice", Feature::Rainfall).unwrap();
        assert_eq!(rain.min, 180.0);
        assert_eq!(rain.max, 300.0);
    }

    #[test]
    fn min_never_exceeds_max_and_values_stay_inside() {
        let records = sample_records();
        let table = CropRangeTable::from_records(&records).unwrap();
        for record in &records {
            for feature in Feature::ALL {
                let range = table.range_of(&record.label, feature).unwrap();
                assert!(range.min <= range.max);
                assert!(range.contains(record.feature(feature)));
            }
        }
    }

    #[test]
    fn labels_are_exactly_the_dataset_labels() {
        let table = CropRangeTable::from_records(&sample_records()).unwrap();
        assert_eq!(table.crop_count(), 2);
        assert!(table.get("rice").is_some());
        assert!(table.get("mango").is_some());
        assert!(table.get("wheat").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        let table = CropRangeTable::from_records(&sample_records()).unwrap();
        assert!(table.get("  RICE ").is_some());
        assert!(table.range_of(" Mango", Feature::Ph).is_ok());
    }

    #[test]
    fn unknown_crop_is_an_error() {
        let table = CropRangeTable::from_records(&sample_records()).unwrap();
        let err = table.range_of("unicorn-fruit", Feature::Ph).unwrap_err();
        assert!(matches!(err, AdvisoryError::UnknownCrop(_)));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(CropRangeTable::from_records(&[]).is_err());
    }
}
