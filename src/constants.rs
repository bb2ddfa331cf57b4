//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "florascan";

/// Placeholder for enrichment fields with no catalog data.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Default model input size (square, pixels).
pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// Confidence value bounds and formatting.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for percentage formatting in exports.
    pub const PERCENT_DECIMALS: usize = 2;
}

/// Display-confidence jitter bounds.
///
/// The jitter is a cosmetic subtraction applied to raw confidences before
/// display. It is re-drawn on every call and intentionally unseeded; see
/// `jitter::UniformJitter` for the caveat.
pub mod jitter {
    /// Lower bound of the uniform draw.
    pub const MIN: f32 = 0.01;
    /// Upper bound of the uniform draw.
    pub const MAX: f32 = 0.05;
    /// Decimal places the draw is rounded to before subtraction.
    pub const DECIMAL_PLACES: u32 = 4;
}

/// Catalog source column positions.
///
/// The reference spreadsheet carries its columns in a fixed order. Index 4
/// is present in the source but not mapped to any catalog field.
pub mod catalog_columns {
    /// Species name (lookup key).
    pub const NAME: usize = 0;
    /// Family.
    pub const FAMILY: usize = 1;
    /// Genus.
    pub const GENUS: usize = 2;
    /// Species.
    pub const SPECIES: usize = 3;
    /// Distribution.
    pub const DISTRIBUTION: usize = 5;
    /// Appearance.
    pub const APPEARANCE: usize = 6;
}

/// Export table header, in column order.
pub const EXPORT_HEADER: [&str; 8] = [
    "Image",
    "Label",
    "Confidence",
    "Family",
    "Genus",
    "Species",
    "Distribution",
    "Appearance",
];

/// Supported image file extensions for input collection.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Output file extensions by format.
pub mod output_extensions {
    /// XLSX workbook extension.
    pub const XLSX: &str = ".results.xlsx";
    /// CSV output extension.
    pub const CSV: &str = ".results.csv";
    /// JSON output extension.
    pub const JSON: &str = ".results.json";
}

/// Default base name for batch export files.
pub const DEFAULT_EXPORT_STEM: &str = "florascan";

/// UTF-8 Byte Order Mark for Excel compatibility in CSV files.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";
