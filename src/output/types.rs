//! Output type definitions.

use crate::catalog::CatalogEntry;
use crate::constants::confidence::PERCENT_DECIMALS;
use serde::Serialize;

/// One classified image in a batch result.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// File name of the source image.
    pub image_name: String,
    /// Predicted species label.
    pub label: String,
    /// Jittered confidence shown to the user (0.0 - 1.0).
    pub display_confidence: f32,
    /// Catalog attributes for the label.
    #[serde(flatten)]
    pub entry: CatalogEntry,
}

impl BatchEntry {
    /// Display confidence formatted as a percentage string, e.g. `87.00%`.
    pub fn confidence_percent(&self) -> String {
        format!(
            "{:.decimals$}%",
            f64::from(self.display_confidence) * 100.0,
            decimals = PERCENT_DECIMALS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(display_confidence: f32) -> BatchEntry {
        BatchEntry {
            image_name: "rose.jpg".to_string(),
            label: "Rose".to_string(),
            display_confidence,
            entry: CatalogEntry::unknown(),
        }
    }

    #[test]
    fn test_confidence_percent_two_decimals() {
        assert_eq!(entry(0.87).confidence_percent(), "87.00%");
        assert_eq!(entry(0.8765).confidence_percent(), "87.65%");
        assert_eq!(entry(0.0).confidence_percent(), "0.00%");
        assert_eq!(entry(1.0).confidence_percent(), "100.00%");
    }
}
