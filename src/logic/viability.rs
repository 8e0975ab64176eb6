use crate::models::{MonthlyClimate, ViabilityVerdict};
use crate::reference::{CropRangeTable, Feature};

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Compare the supplied crop against its empirically observed ranges for
/// temperature, humidity, pH and rainfall, in that fixed order.
///
/// An unknown crop is a normal negative verdict, not an error.
pub fn check_viability(
    table: &CropRangeTable,
    crop_name: &str,
    climate: &MonthlyClimate,
    ph: f64,
) -> ViabilityVerdict {
    let crop_name = crop_name.trim().to_lowercase();

    let Some(profile) = table.get(&crop_name) else {
        return ViabilityVerdict::not_viable(format!(
            "Sorry, '{}' is not in our database yet.",
            crop_name
        ));
    };

    let mut issues = Vec::new();
    for feature in Feature::VIABILITY {
        let value = match feature {
            Feature::Temperature => climate.temperature_c,
            Feature::Humidity => climate.humidity_percent,
            Feature::Ph => ph,
            Feature::Rainfall => climate.rainfall_mm,
            _ => unreachable!("VIABILITY only lists climate and pH features"),
        };

        let range = profile.range(feature);
        let problem = if range.contains(value) {
            None
        } else if value < range.min {
            Some("too low")
        } else {
            Some("too high")
        };

        if let Some(direction) = problem {
            issues.push(format!(
                "{} is {} (ideal: {:.1}-{:.1})",
                feature.display_name(),
                direction,
                range.min,
                range.max
            ));
        }
    }

    if issues.is_empty() {
        ViabilityVerdict::viable(format!(
            "Conditions are perfect! {} thrives here.",
            capitalize(&crop_name)
        ))
    } else {
        ViabilityVerdict::not_viable(format!(
            "Warning for {}: {}",
            crop_name,
            issues.join(" | ")
        ))
    }
}
