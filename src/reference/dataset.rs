use crate::error::{AdvisoryError, Result};
use crate::reference::ranges::Feature;
use std::path::Path;

/// One row of the historical crop-growing dataset: seven measured features
/// plus the crop label the record was grown under.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRecord {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub label: String,
}

impl HistoricalRecord {
    pub fn feature(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Nitrogen => self.n,
            Feature::Phosphorus => self.p,
            Feature::Potassium => self.k,
            Feature::Temperature => self.temperature,
            Feature::Humidity => self.humidity,
            Feature::Ph => self.ph,
            Feature::Rainfall => self.rainfall,
        }
    }
}

/// Load the historical dataset from a CSV file with the header
/// `N,P,K,temperature,humidity,ph,rainfall,label`.
///
/// An unreadable or empty dataset is a startup-fatal condition for the
/// caller; there is no advisory capability without it.
pub fn load_records(path: &Path) -> Result<Vec<HistoricalRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AdvisoryError::InvalidData(format!("cannot read dataset {}: {}", path.display(), e))
    })?;

    let records = parse_csv(&text)?;
    if records.is_empty() {
        return Err(AdvisoryError::InvalidData(format!(
            "dataset {} contains no records",
            path.display()
        )));
    }

    tracing::info!(
        "Loaded {} historical records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

fn parse_csv(text: &str) -> Result<Vec<HistoricalRecord>> {
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if i == 0 || line.trim().is_empty() {
            continue; // Skip header or empty lines
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 8 {
            return Err(AdvisoryError::InvalidData(format!(
                "dataset line {}: expected 8 fields, found {}",
                i + 1,
                fields.len()
            )));
        }

        let parse_field = |idx: usize| -> Result<f64> {
            fields[idx].trim().parse::<f64>().map_err(|_| {
                AdvisoryError::InvalidData(format!(
                    "dataset line {}: invalid number '{}'",
                    i + 1,
                    fields[idx]
                ))
            })
        };

        records.push(HistoricalRecord {
            n: parse_field(0)?,
            p: parse_field(1)?,
            k: parse_field(2)?,
            temperature: parse_field(3)?,
            humidity: parse_field(4)?,
            ph: parse_field(5)?,
            rainfall: parse_field(6)?,
            label: fields[7].trim().to_lowercase(),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
N,P,K,temperature,humidity,ph,rainfall,label
90,42,43,20.88,82.00,6.50,202.94,rice
85,58,41,21.77,80.32,7.04,226.66,rice
60,55,44,23.00,82.32,7.84,263.96,Rice
";

    #[test]
    fn parses_rows_and_normalizes_labels() {
        let records = parse_csv(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].n, 90.0);
        assert_eq!(records[0].rainfall, 202.94);
        // Labels come out lowercased
        assert!(records.iter().all(|r| r.label == "rice"));
    }

    #[test]
    fn rejects_short_rows() {
        let bad = "N,P,K,temperature,humidity,ph,rainfall,label\n90,42,43\n";
        assert!(parse_csv(bad).is_err());
    }

    #[test]
    fn rejects_non_numeric_values() {
        let bad = "N,P,K,temperature,humidity,ph,rainfall,label\n90,42,43,x,80,6.5,200,rice\n";
        assert!(parse_csv(bad).is_err());
    }

    #[test]
    fn feature_accessor_matches_fields() {
        let records = parse_csv(SAMPLE).unwrap();
        let r = &records[0];
        assert_eq!(r.feature(Feature::Nitrogen), r.n);
        assert_eq!(r.feature(Feature::Ph), r.ph);
        assert_eq!(r.feature(Feature::Rainfall), r.rainfall);
    }
}
